use crate::error::PuzzleError;
use crate::puzzle::Board;

/// An initial board paired with the board to reach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    initial: Board,
    goal: Board,
}

impl Problem {
    pub fn new(initial: Board, goal: Board) -> Result<Self, PuzzleError> {
        if initial.size() != goal.size() {
            return Err(PuzzleError::SizeMismatch {
                initial: initial.size(),
                goal: goal.size(),
            });
        }
        Ok(Self { initial, goal })
    }

    /// Targets [`Board::solved`] of the initial board's size.
    pub fn standard(initial: Board) -> Self {
        let goal = Board::solved(initial.size());
        Self { initial, goal }
    }

    pub fn initial(&self) -> &Board {
        &self.initial
    }

    pub fn goal(&self) -> &Board {
        &self.goal
    }

    pub fn size(&self) -> usize {
        self.initial.size()
    }

    pub fn is_goal(&self, board: &Board) -> bool {
        *board == self.goal
    }

    /// Parity pre-check; the search itself never performs it.
    pub fn is_solvable(&self) -> bool {
        self.initial.parity_class() == self.goal.parity_class()
    }

    pub fn ensure_solvable(&self) -> Result<(), PuzzleError> {
        if self.is_solvable() {
            Ok(())
        } else {
            Err(PuzzleError::Unsolvable)
        }
    }
}
