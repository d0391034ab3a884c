use std::time::Duration;

use super::{Interrupt, InterruptibleSolver};
use crate::{Formula, Result, SATSolution, Solver};

/// Gives up with [`SATSolution::Unknown`] once `max_duration` has passed
pub struct TimeLimitedSolver<S: InterruptibleSolver> {
    max_duration: Duration,
    solver: S,
}

impl<S: InterruptibleSolver> TimeLimitedSolver<S> {
    pub fn new(solver: S, max_duration: Duration) -> TimeLimitedSolver<S> {
        TimeLimitedSolver {
            solver,
            max_duration,
        }
    }
}

impl<S: InterruptibleSolver> Solver for TimeLimitedSolver<S> {
    fn solve(&mut self, formula: &Formula) -> Result<SATSolution> {
        self.solve_interruptible(formula, &Interrupt::never())
    }
}

impl<S: InterruptibleSolver> InterruptibleSolver for TimeLimitedSolver<S> {
    fn solve_interruptible(&mut self, formula: &Formula, interrupt: &Interrupt) -> Result<SATSolution> {
        let interrupt = interrupt.clone().with_timeout(self.max_duration);
        self.solver.solve_interruptible(formula, &interrupt)
    }
}
