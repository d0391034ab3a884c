use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use satnet::generation::random_ksat;
use satnet::solvers::{Interrupt, InterruptibleSolver, TimeLimitedSolver, TimedSolver};
use satnet::tree::formula_to_tree;
use satnet::{Combination, FirstVariable, Formula, SATSolution, SatisfactionSolver, Solver};

#[test]
fn formula_tree_of_small_formula() {
    let formula = Formula::new(vec![vec![1, 2, 3], vec![-1, -2]]).unwrap();
    let tree = formula_to_tree(formula.clauses(), Combination::Sequential).unwrap();
    assert_eq!(tree.to_string(), "Start(And(Or(a, Or(b, c)), Or(Not(a), Not(b))))");
}

#[test]
fn expired_time_limit_gives_unknown() {
    let formula = Formula::new(vec![vec![1, 2]]).unwrap();
    let mut solver = TimeLimitedSolver::new(SatisfactionSolver::new(FirstVariable), Duration::from_secs(0));
    assert_eq!(solver.solve(&formula), Ok(SATSolution::Unknown));
}

#[test]
fn generous_time_limit_solves() {
    let formula = Formula::new(vec![vec![1, 2], vec![-1]]).unwrap();
    let mut solver = TimeLimitedSolver::new(SatisfactionSolver::new(FirstVariable), Duration::from_secs(3600));
    assert!(solver.solve(&formula).unwrap().is_sat());
}

#[test]
fn raised_flag_interrupts() {
    let formula = Formula::new(vec![vec![1, 2]]).unwrap();
    let interrupt = Interrupt::never().with_flag(Arc::new(AtomicBool::new(true)));
    let mut solver = SatisfactionSolver::new(FirstVariable);
    assert_eq!(solver.solve_interruptible(&formula, &interrupt), Ok(SATSolution::Unknown));
}

#[test]
fn timed_solver_reports_solution() {
    let mut rng = StdRng::seed_from_u64(17);
    let formula = random_ksat(&mut rng, 3, 10, 20).unwrap();

    let expected = SatisfactionSolver::new(FirstVariable).solve(&formula).unwrap();
    let mut solver = TimedSolver::new(SatisfactionSolver::new(FirstVariable));
    let (_, solution) = solver.solve_timed(&formula).unwrap();
    assert_eq!(solution, expected);
}
