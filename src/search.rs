//! Best-first search over sliding-puzzle boards.
//!
//! One loop covers both Uniform-Cost Search and A*: the only difference is the
//! [`Heuristic`] used to compute `f = g + h`. Nodes are popped in
//! `(f, insertion order)` order, the goal test runs on removal, and states
//! already expanded are skipped when popped again.
//!
//! Budgets are checked at the top of every iteration, before the frontier is
//! touched, so a zero budget stops even a search whose root is the goal.

use std::collections::HashSet;
use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use crate::frontier::Frontier;
use crate::heuristic::{Evaluator, Heuristic};
use crate::node::{Node, NodeArena, NodeId};
use crate::problem::Problem;
use crate::puzzle::{Board, Move};

const PROGRESS_INTERVAL: u64 = 100_000;

/// Knobs for a single search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchConfig {
    pub heuristic: Heuristic,
    /// Stop after this many expansions.
    pub max_expansions: Option<u64>,
    /// Stop once this much wall-clock time has passed.
    pub time_limit: Option<Duration>,
}

impl SearchConfig {
    pub fn new(heuristic: Heuristic) -> Self {
        Self {
            heuristic,
            ..Self::default()
        }
    }

    pub fn with_max_expansions(mut self, limit: u64) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

/// Which budget stopped a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    Expansions(u64),
    Time(Duration),
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Budget::Expansions(n) => write!(f, "expansion limit of {}", n),
            Budget::Time(d) => write!(f, "time limit of {:?}", d),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Nodes taken off the frontier and expanded.
    pub expanded: u64,
    /// Successor nodes created.
    pub generated: u64,
    /// Pops discarded because their state was already expanded.
    pub duplicates: u64,
    /// Peak frontier size.
    pub max_frontier: usize,
    pub elapsed: Duration,
}

/// One board on a solution path with its search costs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub board: Board,
    /// `None` for the initial board.
    pub via: Option<Move>,
    pub g: u32,
    pub h: u32,
    pub f: u32,
}

/// Boards from the initial state to the goal, inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    steps: Vec<Step>,
}

impl Solution {
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of moves, one less than the number of steps.
    pub fn len(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn moves(&self) -> Vec<Move> {
        self.steps.iter().filter_map(|step| step.via).collect()
    }

    pub fn boards(&self) -> impl Iterator<Item = &Board> {
        self.steps.iter().map(|step| &step.board)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved(Solution),
    /// The frontier emptied without reaching the goal.
    NoSolution,
    BudgetExceeded(Budget),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub heuristic: Heuristic,
    pub outcome: Outcome,
    pub stats: SearchStats,
}

impl SearchReport {
    pub fn solution(&self) -> Option<&Solution> {
        match &self.outcome {
            Outcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }
}

/// Runs a best-first search for `problem`.
///
/// The parity pre-check is not performed here; an unreachable goal simply
/// exhausts the frontier and yields [`Outcome::NoSolution`].
///
/// ```
/// use slider_search::{solve, Board, Heuristic, Problem, SearchConfig};
///
/// let start: Board = "1 2 3; 4 5 6; 0 7 8".parse().unwrap();
/// let report = solve(&Problem::standard(start), SearchConfig::new(Heuristic::Manhattan));
/// assert_eq!(report.solution().map(|s| s.len()), Some(2));
/// ```
pub fn solve(problem: &Problem, config: SearchConfig) -> SearchReport {
    Solver::new(problem, config).run()
}

/// A search bound to one problem and configuration.
///
/// `run` owns its frontier, visited set and node arena for the duration of
/// the call, so a solver can be run repeatedly and independent solvers can run
/// on separate threads.
pub struct Solver<'p> {
    problem: &'p Problem,
    config: SearchConfig,
    evaluator: Evaluator<'p>,
}

impl<'p> Solver<'p> {
    pub fn new(problem: &'p Problem, config: SearchConfig) -> Self {
        Self {
            problem,
            config,
            evaluator: Evaluator::new(config.heuristic, problem.goal()),
        }
    }

    pub fn run(&self) -> SearchReport {
        let started = Instant::now();
        let mut arena = NodeArena::new();
        let mut frontier = Frontier::new();
        let mut visited: HashSet<Board> = HashSet::new();
        let mut stats = SearchStats::default();

        info!(
            heuristic = %self.config.heuristic,
            size = self.problem.size(),
            "starting search"
        );

        let initial = self.problem.initial().clone();
        let h = self.evaluator.estimate(&initial);
        let root = arena.push(Node::root(initial, h));
        frontier.push(h, root);

        let outcome = loop {
            if let Some(budget) = self.exhausted_budget(&stats, started) {
                debug!(%budget, expanded = stats.expanded, "search budget exceeded");
                break Outcome::BudgetExceeded(budget);
            }
            let Some(id) = frontier.pop() else {
                break Outcome::NoSolution;
            };
            let node = arena.get(id);

            if self.problem.is_goal(&node.board) {
                break Outcome::Solved(Self::reconstruct(&arena, id));
            }
            if visited.contains(&node.board) {
                stats.duplicates += 1;
                continue;
            }

            visited.insert(node.board.clone());
            stats.expanded += 1;
            trace!(depth = node.depth, f = node.f(), "expanding");
            if stats.expanded % PROGRESS_INTERVAL == 0 {
                debug!(
                    expanded = stats.expanded,
                    frontier = frontier.len(),
                    f = node.f(),
                    "search progress"
                );
            }

            let children = self.expand(id, node);
            for child in children {
                let f = child.f();
                let child_id = arena.push(child);
                frontier.push(f, child_id);
                stats.generated += 1;
            }
        };

        stats.max_frontier = frontier.high_water();
        stats.elapsed = started.elapsed();
        match &outcome {
            Outcome::Solved(solution) => info!(
                moves = solution.len(),
                expanded = stats.expanded,
                "goal reached"
            ),
            Outcome::NoSolution => info!(expanded = stats.expanded, "frontier exhausted"),
            Outcome::BudgetExceeded(budget) => {
                info!(%budget, expanded = stats.expanded, "search stopped early")
            }
        }

        SearchReport {
            heuristic: self.config.heuristic,
            outcome,
            stats,
        }
    }

    /// Successors of `parent`, one per legal blank move, in [`Move::ALL`]
    /// order.
    pub(crate) fn expand(&self, parent_id: NodeId, parent: &Node) -> Vec<Node> {
        parent
            .board
            .successors()
            .map(|(mv, board)| {
                let h = self.evaluator.estimate(&board);
                Node {
                    board,
                    parent: Some(parent_id),
                    via: Some(mv),
                    depth: parent.depth + 1,
                    h,
                }
            })
            .collect()
    }

    fn exhausted_budget(&self, stats: &SearchStats, started: Instant) -> Option<Budget> {
        if let Some(limit) = self.config.max_expansions {
            if stats.expanded >= limit {
                return Some(Budget::Expansions(limit));
            }
        }
        if let Some(limit) = self.config.time_limit {
            if started.elapsed() >= limit {
                return Some(Budget::Time(limit));
            }
        }
        None
    }

    fn reconstruct(arena: &NodeArena, goal: NodeId) -> Solution {
        let steps = arena
            .path_to(goal)
            .into_iter()
            .map(|node| Step {
                board: node.board.clone(),
                via: node.via,
                g: node.depth,
                h: node.h,
                f: node.f(),
            })
            .collect();
        Solution { steps }
    }
}
