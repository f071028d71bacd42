use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Parser};
use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use rand::{rngs::StdRng, thread_rng, RngCore, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use slider_search::{
    solve, Board, Heuristic, Outcome, Problem, SearchConfig, SearchReport, Solution,
};

#[derive(Parser, Debug)]
#[command(name = "slider-search", version, about = "Solve n x n sliding-tile puzzles with UCS or A*")]
#[command(group(ArgGroup::new("source").required(true).args(["board", "file", "random", "scramble"])))]
struct Args {
    /// Initial board, rows separated by ';', tiles by spaces or commas
    #[arg(long, value_name = "ROWS")]
    board: Option<String>,

    /// Read the initial board from a file (one row per line)
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Start from a uniformly shuffled solvable board
    #[arg(long)]
    random: bool,

    /// Start from the goal walked this many random moves away
    #[arg(long, value_name = "MOVES")]
    scramble: Option<usize>,

    /// Board width for --random and --scramble
    #[arg(long, default_value_t = 3)]
    size: usize,

    /// Seed for --random and --scramble
    #[arg(long)]
    seed: Option<u64>,

    /// Goal board; defaults to 1..n*n-1 followed by the blank
    #[arg(long, value_name = "ROWS")]
    goal: Option<String>,

    /// none (uniform-cost), misplaced or manhattan
    #[arg(long, default_value_t = Heuristic::Manhattan)]
    heuristic: Heuristic,

    /// Run every heuristic and print a comparison table
    #[arg(long)]
    compare: bool,

    /// Give up after this many expansions
    #[arg(long, value_name = "N")]
    max_expansions: Option<u64>,

    /// Give up after this many milliseconds
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Only print the summary, not every step
    #[arg(short, long)]
    quiet: bool,

    /// Disable terminal colours
    #[arg(long)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn initial_board(args: &Args) -> Result<Board> {
    if let Some(rows) = &args.board {
        return rows.parse().context("invalid --board");
    }
    if let Some(path) = &args.file {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        return content
            .parse()
            .with_context(|| format!("invalid board in {}", path.display()));
    }

    if args.size < 2 {
        bail!("--size must be at least 2, got {}", args.size);
    }
    let seed = args.seed.unwrap_or_else(|| thread_rng().next_u64());
    info!(seed, size = args.size, "generating board");
    let mut rng = StdRng::seed_from_u64(seed);
    Ok(match args.scramble {
        Some(moves) => Board::scrambled(args.size, moves, &mut rng),
        None => Board::shuffled(args.size, &mut rng),
    })
}

fn build_problem(args: &Args) -> Result<Problem> {
    let initial = initial_board(args)?;
    let problem = match &args.goal {
        Some(rows) => {
            let goal: Board = rows.parse().context("invalid --goal")?;
            Problem::new(initial, goal)?
        }
        None => Problem::standard(initial),
    };
    problem
        .ensure_solvable()
        .context("the goal lies in the other parity class, no sequence of moves reaches it")?;
    Ok(problem)
}

/// Styling is only emitted when stdout is a terminal and not disabled.
fn use_color(no_color: bool, stdout_is_tty: bool) -> bool {
    !no_color && stdout_is_tty
}

fn render_board(board: &Board, moved: Option<u32>, color: bool) -> String {
    let width = (board.tiles().len() - 1).to_string().len();
    let mut out = String::new();
    for row in board.rows() {
        for &val in row {
            let cell = format!("{:>width$}", val, width = width);
            let cell = if !color {
                cell
            } else if val == 0 {
                cell.dark_grey().reverse().to_string()
            } else if Some(val) == moved {
                cell.green().bold().to_string()
            } else {
                cell
            };
            out.push_str(&cell);
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

fn print_solution(solution: &Solution, color: bool) {
    let mut previous: Option<&Board> = None;
    for (i, step) in solution.steps().iter().enumerate() {
        // the tile that moved now sits where the blank used to be
        let moved = previous.map(|prev| {
            let (row, col) = prev.blank();
            step.board.get(row, col)
        });
        match step.via {
            Some(mv) => println!("{}. {} (g={} h={} f={})", i, mv, step.g, step.h, step.f),
            None => println!("Start (g={} h={} f={})", step.g, step.h, step.f),
        }
        println!("{}", render_board(&step.board, moved, color));
        previous = Some(&step.board);
    }
}

fn print_summary(report: &SearchReport) {
    let stats = &report.stats;
    match &report.outcome {
        Outcome::Solved(solution) => {
            println!("Found optimal solution with {} moves", solution.len())
        }
        Outcome::NoSolution => println!("No solution: every reachable board was expanded"),
        Outcome::BudgetExceeded(budget) => println!("Gave up after hitting the {}", budget),
    }
    println!(
        "heuristic={} expanded={} generated={} duplicates={} max_frontier={} elapsed={:.2?}",
        report.heuristic,
        stats.expanded,
        stats.generated,
        stats.duplicates,
        stats.max_frontier,
        stats.elapsed
    );
}

fn print_comparison(reports: &[SearchReport]) {
    println!(
        "{:<10} {:>6} {:>10} {:>10} {:>10} {:>12}",
        "heuristic", "moves", "expanded", "generated", "frontier", "elapsed"
    );
    for report in reports {
        let moves = match report.solution() {
            Some(solution) => solution.len().to_string(),
            None => "-".to_string(),
        };
        println!(
            "{:<10} {:>6} {:>10} {:>10} {:>10} {:>12.2?}",
            report.heuristic.name(),
            moves,
            report.stats.expanded,
            report.stats.generated,
            report.stats.max_frontier,
            report.stats.elapsed
        );
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);
    let color = use_color(args.no_color, std::io::stdout().is_tty());

    let problem = build_problem(&args)?;
    println!("Initial board:\n{}", render_board(problem.initial(), None, color));
    if problem.goal() != &Board::solved(problem.size()) {
        println!("Goal board:\n{}", render_board(problem.goal(), None, color));
    }

    let mut config = SearchConfig::new(args.heuristic);
    if let Some(limit) = args.max_expansions {
        config = config.with_max_expansions(limit);
    }
    if let Some(ms) = args.timeout_ms {
        config = config.with_time_limit(Duration::from_millis(ms));
    }

    if args.compare {
        let reports: Vec<SearchReport> = Heuristic::ALL
            .into_iter()
            .map(|heuristic| solve(&problem, SearchConfig { heuristic, ..config }))
            .collect();
        print_comparison(&reports);
        let lengths: Vec<usize> = reports
            .iter()
            .filter_map(|r| r.solution().map(Solution::len))
            .collect();
        if lengths.windows(2).any(|pair| pair[0] != pair[1]) {
            bail!("heuristics disagree on the optimal length: {:?}", lengths);
        }
        let all_solved = lengths.len() == reports.len();
        return Ok(if all_solved { ExitCode::SUCCESS } else { ExitCode::from(2) });
    }

    let report = solve(&problem, config);
    if !args.quiet {
        if let Some(solution) = report.solution() {
            print_solution(solution, color);
        }
    }
    print_summary(&report);

    Ok(match report.outcome {
        Outcome::Solved(_) => ExitCode::SUCCESS,
        Outcome::NoSolution | Outcome::BudgetExceeded(_) => ExitCode::from(2),
    })
}
