use std::time::{Duration, Instant};

use crate::{Formula, Result, SATSolution, Solver};

/// A wrapper for another solver which exposes time performance
/// measurement
pub struct TimedSolver<S> {
    solver: S,
}

impl<S: Solver> Solver for TimedSolver<S> {
    fn solve(&mut self, formula: &Formula) -> Result<SATSolution> {
        self.solver.solve(formula)
    }
}

impl<S> TimedSolver<S> {
    /// Wraps a solver in a `TimedSolver`
    pub fn new(solver: S) -> Self {
        TimedSolver { solver }
    }

    pub fn into_inner(self) -> S {
        self.solver
    }
}

impl<S: Solver> TimedSolver<S> {
    /// Solves a given formula but measures time additionally
    pub fn solve_timed(&mut self, formula: &Formula) -> Result<(Duration, SATSolution)> {
        let start = Instant::now();
        let solution = self.solver.solve(formula)?;
        Ok((start.elapsed(), solution))
    }
}
