use rand::{seq::SliceRandom, Rng};
use std::fmt;
use std::str::FromStr;

use crate::error::PuzzleError;

/// Direction the blank travels in a single move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Right,
    Down,
    Left,
}

impl Move {
    /// Expansion order. Changing it changes which of several equally short
    /// solutions the search reports.
    pub const ALL: [Move; 4] = [Move::Up, Move::Right, Move::Down, Move::Left];

    /// (row, col) delta applied to the blank.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Right => (0, 1),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Right => "Right",
            Move::Down => "Down",
            Move::Left => "Left",
        };
        write!(f, "{}", s)
    }
}

/// An n×n sliding-puzzle configuration, stored row-major.
///
/// A `Board` always holds every value in `0..n*n` exactly once; the only
/// constructors validate that, and moves only ever swap the blank (0) with a
/// neighbour. Boards are never modified in place: [`Board::slide`] returns a
/// fresh copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    tiles: Vec<u32>,
    blank: usize,
}

impl Board {
    /// Builds a board from rows, validating shape and contents.
    pub fn new(rows: Vec<Vec<u32>>) -> Result<Self, PuzzleError> {
        if rows.is_empty() {
            return Err(PuzzleError::Empty);
        }
        let size = rows.len();
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != size {
                return Err(PuzzleError::NotSquare {
                    row,
                    found: cells.len(),
                    expected: size,
                });
            }
        }
        Self::from_flat(size, rows.into_iter().flatten().collect())
    }

    /// Builds a board from `size * size` row-major tiles.
    pub fn from_flat(size: usize, tiles: Vec<u32>) -> Result<Self, PuzzleError> {
        if size < 2 {
            return Err(PuzzleError::TooSmall(size));
        }
        let cells = size * size;
        if tiles.len() != cells {
            return Err(PuzzleError::WrongTileCount {
                size,
                expected: cells,
                found: tiles.len(),
            });
        }

        let max = (cells - 1) as u32;
        let mut seen = vec![false; cells];
        for &value in &tiles {
            if value > max {
                return Err(PuzzleError::OutOfRange { value, max });
            }
            if std::mem::replace(&mut seen[value as usize], true) {
                return Err(PuzzleError::Duplicate(value));
            }
        }

        // n*n distinct values in 0..n*n, so 0 is present exactly once.
        let blank = tiles.iter().position(|&t| t == 0).unwrap_or_default();
        Ok(Self { size, tiles, blank })
    }

    /// The standard goal: 1..n*n-1 in reading order with the blank last.
    ///
    /// # Panics
    /// Panics if `size < 2`.
    pub fn solved(size: usize) -> Self {
        assert!(size >= 2, "board must be at least 2x2");
        let cells = size * size;
        let tiles = (1..cells as u32).chain(std::iter::once(0)).collect();
        Self {
            size,
            tiles,
            blank: cells - 1,
        }
    }

    /// A uniformly shuffled board that is solvable towards [`Board::solved`].
    pub fn shuffled<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let mut board = Self::solved(size);
        loop {
            board.tiles.shuffle(rng);
            board.blank = board.tiles.iter().position(|&t| t == 0).unwrap_or_default();
            if board.is_solvable() {
                return board;
            }
        }
    }

    /// Walks the blank `moves` random steps away from the goal without ever
    /// stepping straight back, so the optimal distance is at most `moves`.
    pub fn scrambled<R: Rng + ?Sized>(size: usize, moves: usize, rng: &mut R) -> Self {
        let mut board = Self::solved(size);
        let mut last: Option<Move> = None;
        for _ in 0..moves {
            let options: Vec<(Move, Board)> = board
                .successors()
                .filter(|(mv, _)| last.map_or(true, |l| *mv != l.opposite()))
                .collect();
            let Some((mv, next)) = options.choose(rng).cloned() else {
                break;
            };
            last = Some(mv);
            board = next;
        }
        board
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.tiles[row * self.size + col]
    }

    /// (row, col) of the blank.
    pub fn blank(&self) -> (usize, usize) {
        (self.blank / self.size, self.blank % self.size)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.tiles.chunks(self.size)
    }

    /// The board after moving the blank in `movement`, or `None` if that
    /// would leave the grid.
    pub fn slide(&self, movement: Move) -> Option<Self> {
        let (row, col) = self.blank();
        let (dr, dc) = movement.as_offset();

        let new_row = row as isize + dr;
        let new_col = col as isize + dc;
        let bound = self.size as isize;
        if new_row < 0 || new_row >= bound || new_col < 0 || new_col >= bound {
            return None;
        }

        let target = new_row as usize * self.size + new_col as usize;
        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, target);
        Some(Self {
            size: self.size,
            tiles,
            blank: target,
        })
    }

    /// Every board one legal move away, in [`Move::ALL`] order.
    pub fn successors(&self) -> impl Iterator<Item = (Move, Board)> + '_ {
        Move::ALL
            .into_iter()
            .filter_map(move |mv| self.slide(mv).map(|next| (mv, next)))
    }

    /// Pairs of non-blank tiles out of ascending order in reading order.
    pub fn inversions(&self) -> usize {
        let flattened = &self.tiles;
        flattened
            .iter()
            .enumerate()
            .filter(|&(_, &val)| val != 0)
            .map(|(i, &val)| {
                flattened[i + 1..]
                    .iter()
                    .filter(|&&next| next != 0 && next < val)
                    .count()
            })
            .sum()
    }

    /// Reachability invariant: two boards of the same size can be turned into
    /// each other iff their classes are equal.
    ///
    /// Odd widths use the inversion parity alone. Even widths add the blank's
    /// row counted from the bottom, starting at 1.
    pub fn parity_class(&self) -> u8 {
        let inversions = self.inversions();
        let class = if self.size % 2 == 1 {
            inversions
        } else {
            let (row, _) = self.blank();
            inversions + (self.size - row)
        };
        (class % 2) as u8
    }

    /// Whether [`Board::solved`] of the same size is reachable.
    pub fn is_solvable(&self) -> bool {
        // The standard goal has no inversions and its blank on the bottom row.
        let goal_class = if self.size % 2 == 1 { 0 } else { 1 };
        self.parity_class() == goal_class
    }
}

/// Rows are separated by `;` or newlines, tiles by whitespace or commas.
///
/// ```
/// use slider_search::puzzle::Board;
///
/// let board: Board = "1 2 3; 4 5 6; 7 8 0".parse().unwrap();
/// assert_eq!(board, Board::solved(3));
/// ```
impl FromStr for Board {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .split(|c: char| c == ';' || c == '\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|tok| !tok.is_empty())
                    .map(|tok| {
                        tok.parse::<u32>()
                            .map_err(|_| PuzzleError::Parse(tok.to_string()))
                    })
                    .collect::<Result<Vec<u32>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(rows)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.tiles.len() - 1).to_string().len();
        for row in self.rows() {
            for &val in row {
                write!(f, "{:>width$} ", val, width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
