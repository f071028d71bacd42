//! Cost-to-goal estimates.
//!
//! Both non-trivial estimates are admissible and consistent for unit-cost
//! sliding moves, so A* with either returns optimal solutions.

use std::fmt;
use std::str::FromStr;

use crate::error::PuzzleError;
use crate::puzzle::Board;

/// Which estimate the search orders its frontier by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Heuristic {
    /// Always 0; the search degrades to Uniform-Cost Search.
    None,
    /// Non-blank tiles not on their goal cell.
    MisplacedTile,
    /// Sum of grid distances of non-blank tiles to their goal cells.
    #[default]
    Manhattan,
}

impl Heuristic {
    pub const ALL: [Heuristic; 3] = [
        Heuristic::None,
        Heuristic::MisplacedTile,
        Heuristic::Manhattan,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::None => "none",
            Heuristic::MisplacedTile => "misplaced",
            Heuristic::Manhattan => "manhattan",
        }
    }

    /// One-off evaluation. Prefer an [`Evaluator`] when scoring many boards
    /// against the same goal.
    pub fn evaluate(self, board: &Board, goal: &Board) -> u32 {
        Evaluator::new(self, goal).estimate(board)
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "ucs" => Ok(Heuristic::None),
            "misplaced" | "misplaced-tile" | "hamming" => Ok(Heuristic::MisplacedTile),
            "manhattan" => Ok(Heuristic::Manhattan),
            _ => Err(PuzzleError::UnknownHeuristic(s.to_string())),
        }
    }
}

/// A heuristic bound to one goal, with the goal's tile coordinates cached.
#[derive(Debug, Clone)]
pub struct Evaluator<'a> {
    mode: Heuristic,
    goal: &'a Board,
    /// `positions[value]` is the (row, col) of `value` in the goal. Only
    /// filled for [`Heuristic::Manhattan`].
    positions: Vec<(usize, usize)>,
}

impl<'a> Evaluator<'a> {
    pub fn new(mode: Heuristic, goal: &'a Board) -> Self {
        let positions = match mode {
            Heuristic::Manhattan => {
                let size = goal.size();
                let mut positions = vec![(0, 0); goal.tiles().len()];
                for (i, &value) in goal.tiles().iter().enumerate() {
                    positions[value as usize] = (i / size, i % size);
                }
                positions
            }
            Heuristic::None | Heuristic::MisplacedTile => Vec::new(),
        };
        Self {
            mode,
            goal,
            positions,
        }
    }

    pub fn mode(&self) -> Heuristic {
        self.mode
    }

    pub fn estimate(&self, board: &Board) -> u32 {
        match self.mode {
            Heuristic::None => 0,
            Heuristic::MisplacedTile => self.misplaced(board),
            Heuristic::Manhattan => self.manhattan(board),
        }
    }

    fn misplaced(&self, board: &Board) -> u32 {
        board
            .tiles()
            .iter()
            .zip(self.goal.tiles())
            .filter(|&(&tile, &target)| tile != 0 && tile != target)
            .count() as u32
    }

    fn manhattan(&self, board: &Board) -> u32 {
        let size = board.size();
        board
            .tiles()
            .iter()
            .enumerate()
            .filter(|&(_, &tile)| tile != 0)
            .map(|(i, &tile)| {
                let (row, col) = (i / size, i % size);
                let (goal_row, goal_col) = self.positions[tile as usize];
                (row.abs_diff(goal_row) + col.abs_diff(goal_col)) as u32
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_none_is_always_zero() {
        let goal = Board::solved(3);
        let start = board("0 7 2; 4 6 1; 3 5 8");
        assert_eq!(Heuristic::None.evaluate(&start, &goal), 0);
    }

    #[test]
    fn test_misplaced_ignores_blank() {
        let goal = Board::solved(3);
        // 7 and 8 shifted right, blank moved: two tiles out of place
        let start = board("1 2 3; 4 5 6; 0 7 8");
        assert_eq!(Heuristic::MisplacedTile.evaluate(&start, &goal), 2);
    }

    #[test]
    fn test_manhattan_known_values() {
        let goal = Board::solved(3);
        assert_eq!(
            Heuristic::Manhattan.evaluate(&board("1 2 3; 4 5 6; 0 7 8"), &goal),
            2
        );
        // 7:3 2:1 4:0 6:1 1:3 3:4 5:1 8:1
        assert_eq!(
            Heuristic::Manhattan.evaluate(&board("0 7 2; 4 6 1; 3 5 8"), &goal),
            14
        );
    }

    #[test]
    fn test_custom_goal_positions() {
        let goal = board("0 1 2; 3 4 5; 6 7 8");
        let start = board("1 0 2; 3 4 5; 6 7 8");
        assert_eq!(Heuristic::Manhattan.evaluate(&start, &goal), 1);
        assert_eq!(Heuristic::MisplacedTile.evaluate(&start, &goal), 1);
    }

    #[test]
    fn test_zero_exactly_at_goal() {
        let mut rng = StdRng::seed_from_u64(3);
        let goal = Board::solved(4);
        for mode in [Heuristic::MisplacedTile, Heuristic::Manhattan] {
            let eval = Evaluator::new(mode, &goal);
            assert_eq!(eval.estimate(&goal), 0);
            for _ in 0..20 {
                let other = Board::scrambled(4, 10, &mut rng);
                assert_eq!(eval.estimate(&other) == 0, other == goal);
            }
        }
    }

    #[test]
    fn test_consistent_along_edges() {
        let mut rng = StdRng::seed_from_u64(11);
        let goal = Board::solved(3);
        for mode in Heuristic::ALL {
            let eval = Evaluator::new(mode, &goal);
            for _ in 0..50 {
                let b = Board::shuffled(3, &mut rng);
                let h = eval.estimate(&b);
                for (_, next) in b.successors() {
                    assert!(eval.estimate(&next) + 1 >= h);
                    assert!(h + 1 >= eval.estimate(&next));
                }
            }
        }
    }

    #[test]
    fn test_manhattan_dominates_misplaced() {
        let mut rng = StdRng::seed_from_u64(5);
        let goal = Board::solved(3);
        for _ in 0..50 {
            let b = Board::shuffled(3, &mut rng);
            assert!(
                Heuristic::Manhattan.evaluate(&b, &goal)
                    >= Heuristic::MisplacedTile.evaluate(&b, &goal)
            );
        }
    }

    #[test]
    fn test_goal_lookup_only_built_for_manhattan() {
        let goal = Board::solved(4);
        assert!(Evaluator::new(Heuristic::None, &goal).positions.is_empty());
        assert!(Evaluator::new(Heuristic::MisplacedTile, &goal).positions.is_empty());
        let manhattan = Evaluator::new(Heuristic::Manhattan, &goal);
        assert_eq!(manhattan.positions.len(), 16);
        assert_eq!(manhattan.positions[0], (3, 3));
        assert_eq!(manhattan.positions[5], (1, 0));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("UCS".parse::<Heuristic>(), Ok(Heuristic::None));
        assert_eq!("misplaced".parse::<Heuristic>(), Ok(Heuristic::MisplacedTile));
        assert_eq!("manhattan".parse::<Heuristic>(), Ok(Heuristic::Manhattan));
        assert!("euclid".parse::<Heuristic>().is_err());
        for mode in Heuristic::ALL {
            assert_eq!(mode.name().parse::<Heuristic>(), Ok(mode));
        }
    }
}
