//! # Sliding-puzzle search
//!
//! Solves n×n sliding-tile puzzles with a generalized best-first search:
//! Uniform-Cost Search, or A* guided by the misplaced-tile count or the
//! Manhattan distance.
//!
//! ## Modules
//! - `puzzle`: the immutable [`Board`], blank [`Move`]s, parsing, random
//!   generation and the parity (solvability) check.
//! - `heuristic`: the [`Heuristic`] selector and a goal-bound [`Evaluator`].
//! - `problem`: [`Problem`], an initial board paired with its goal.
//! - `search`: the driver loop, [`SearchConfig`] budgets and the
//!   [`SearchReport`] it returns.
//!
//! The search-tree arena (`node`) and the `(f, insertion order)` min-heap
//! (`frontier`) are internal to the driver.
//!
//! The search never fails with an error: running out of states or budget is
//! reported through [`Outcome`]. Malformed input is rejected earlier, when a
//! [`Board`] or [`Problem`] is built, with a [`PuzzleError`].

pub mod error;
mod frontier;
pub mod heuristic;
mod node;
pub mod problem;
pub mod puzzle;
pub mod search;

pub use error::PuzzleError;
pub use heuristic::{Evaluator, Heuristic};
pub use problem::Problem;
pub use puzzle::{Board, Move};
pub use search::{
    solve, Budget, Outcome, SearchConfig, SearchReport, SearchStats, Solution, Solver, Step,
};
