use rand::{rngs::StdRng, SeedableRng};

use slider_search::{solve, Board, Heuristic, Outcome, Problem, SearchConfig, Solution};

fn board(s: &str) -> Board {
    s.parse().unwrap()
}

fn solve_standard(start: &Board, heuristic: Heuristic) -> Solution {
    let report = solve(
        &Problem::standard(start.clone()),
        SearchConfig::new(heuristic),
    );
    match report.outcome {
        Outcome::Solved(solution) => solution,
        other => panic!("expected a solution for\n{}got {:?}", start, other),
    }
}

/// Two boards differ by a single blank move iff they differ in exactly two
/// cells, one of them the blank, and those cells are adjacent.
fn one_move_apart(a: &Board, b: &Board) -> bool {
    let diff: Vec<usize> = (0..a.tiles().len())
        .filter(|&i| a.tiles()[i] != b.tiles()[i])
        .collect();
    if diff.len() != 2 {
        return false;
    }
    let size = a.size();
    let (r0, c0) = (diff[0] / size, diff[0] % size);
    let (r1, c1) = (diff[1] / size, diff[1] % size);
    let adjacent = r0.abs_diff(r1) + c0.abs_diff(c1) == 1;
    let swaps_blank = a.tiles()[diff[0]] == 0 || a.tiles()[diff[1]] == 0;
    adjacent && swaps_blank && a.tiles()[diff[0]] == b.tiles()[diff[1]]
}

fn assert_valid_path(start: &Board, goal: &Board, solution: &Solution) {
    let steps = solution.steps();
    assert_eq!(&steps[0].board, start);
    assert_eq!(&steps[steps.len() - 1].board, goal);
    assert_eq!(steps.len() - 1, solution.len());
    assert_eq!(steps[steps.len() - 1].g as usize, solution.len());

    for (i, step) in steps.iter().enumerate() {
        assert_eq!(step.g as usize, i);
        assert_eq!(step.f, step.g + step.h);
    }
    for pair in steps.windows(2) {
        assert!(one_move_apart(&pair[0].board, &pair[1].board));
        let mv = pair[1].via.unwrap();
        assert_eq!(pair[0].board.slide(mv).as_ref(), Some(&pair[1].board));
    }
}

#[test]
fn test_start_equals_goal() {
    let goal = board("1 2 3; 4 5 6; 7 8 0");
    for mode in Heuristic::ALL {
        let solution = solve_standard(&goal, mode);
        assert_eq!(solution.steps().len(), 1);
        assert!(solution.moves().is_empty());
    }
}

#[test]
fn test_two_move_board() {
    let start = board("1 2 3; 4 5 6; 0 7 8");
    for mode in Heuristic::ALL {
        let solution = solve_standard(&start, mode);
        assert_eq!(solution.len(), 2);
        assert_valid_path(&start, &Board::solved(3), &solution);
    }
}

#[test]
fn test_twenty_four_move_board_all_modes_agree() {
    let start = board("0 7 2; 4 6 1; 3 5 8");
    let goal = Board::solved(3);
    for mode in Heuristic::ALL {
        let solution = solve_standard(&start, mode);
        assert_eq!(solution.len(), 24, "heuristic {}", mode);
        assert_valid_path(&start, &goal, &solution);
    }
}

#[test]
fn test_odd_inversions_rejected_before_search() {
    let start = board("1 2 3; 4 5 6; 8 7 0");
    assert!(!start.is_solvable());
    assert!(Problem::standard(start).ensure_solvable().is_err());
}

#[test]
fn test_informed_search_matches_uniform_cost() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..8 {
        let start = Board::shuffled(3, &mut rng);
        let ucs = solve_standard(&start, Heuristic::None);
        for mode in [Heuristic::MisplacedTile, Heuristic::Manhattan] {
            let astar = solve_standard(&start, mode);
            assert_eq!(astar.len(), ucs.len());
            assert_valid_path(&start, &Board::solved(3), &astar);
        }
    }
}

#[test]
fn test_informed_search_expands_fewer_nodes() {
    let problem = Problem::standard(board("0 7 2; 4 6 1; 3 5 8"));
    let expanded = |mode| solve(&problem, SearchConfig::new(mode)).stats.expanded;
    let ucs = expanded(Heuristic::None);
    let misplaced = expanded(Heuristic::MisplacedTile);
    let manhattan = expanded(Heuristic::Manhattan);
    assert!(manhattan <= misplaced);
    assert!(misplaced <= ucs);
}

#[test]
fn test_repeated_runs_are_identical() {
    let mut rng = StdRng::seed_from_u64(99);
    let problem = Problem::standard(Board::scrambled(4, 20, &mut rng));
    for mode in [Heuristic::MisplacedTile, Heuristic::Manhattan] {
        let first = solve(&problem, SearchConfig::new(mode));
        let second = solve(&problem, SearchConfig::new(mode));
        assert_eq!(first.outcome, second.outcome);
        assert_eq!(first.stats.expanded, second.stats.expanded);
        assert!(first.solution().unwrap().len() <= 20);
    }
}

#[test]
fn test_custom_goal() {
    let start = board("1 2 3; 4 5 6; 7 8 0");
    let goal = board("0 1 2; 3 4 5; 6 7 8");
    let problem = Problem::new(start.clone(), goal.clone()).unwrap();
    assert!(problem.is_solvable());

    let ucs = solve(&problem, SearchConfig::new(Heuristic::None));
    let astar = solve(&problem, SearchConfig::new(Heuristic::Manhattan));
    let ucs = ucs.solution().unwrap();
    let astar = astar.solution().unwrap();
    assert_eq!(ucs.len(), astar.len());
    assert_valid_path(&start, &goal, astar);
}

#[test]
fn test_unsolvable_pair_reports_no_solution() {
    let problem = Problem::standard(board("2 1; 3 0"));
    assert!(!problem.is_solvable());
    for mode in Heuristic::ALL {
        let report = solve(&problem, SearchConfig::new(mode));
        assert_eq!(report.outcome, Outcome::NoSolution);
    }
}

#[test]
fn test_independent_searches_in_parallel() {
    let problems: Vec<Problem> = ["1 2 3; 4 5 6; 0 7 8", "4 1 3; 0 2 6; 7 5 8"]
        .iter()
        .map(|s| Problem::standard(board(s)))
        .collect();
    let lengths: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = problems
            .iter()
            .map(|p| scope.spawn(move || solve(p, SearchConfig::default())))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap().solution().unwrap().len())
            .collect()
    });
    assert_eq!(lengths, vec![2, 5]);
}
