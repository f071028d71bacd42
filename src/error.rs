use thiserror::Error;

/// Everything that can go wrong while turning user input into a [`Problem`].
///
/// The search itself never fails: running out of states or budget is an
/// ordinary outcome, see [`Outcome`].
///
/// [`Problem`]: crate::problem::Problem
/// [`Outcome`]: crate::search::Outcome
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("board is empty")]
    Empty,
    #[error("board must be at least 2x2, got {0}x{0}")]
    TooSmall(usize),
    #[error("row {row} has {found} cells, expected {expected}")]
    NotSquare {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("expected {expected} tiles for a {size}x{size} board, found {found}")]
    WrongTileCount {
        size: usize,
        expected: usize,
        found: usize,
    },
    #[error("tile {value} is out of range, tiles must be in 0..={max}")]
    OutOfRange { value: u32, max: u32 },
    #[error("tile {0} appears more than once")]
    Duplicate(u32),
    #[error("cannot parse {0:?} as a tile")]
    Parse(String),
    #[error("initial board is {initial}x{initial} but goal is {goal}x{goal}")]
    SizeMismatch { initial: usize, goal: usize },
    #[error("unknown heuristic {0:?}, expected none, misplaced or manhattan")]
    UnknownHeuristic(String),
    #[error("goal is not reachable from the initial board")]
    Unsolvable,
}
