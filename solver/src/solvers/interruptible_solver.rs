use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use auto_impl::auto_impl;

use crate::{Formula, Result, SATSolution};

/// Conditions under which a search gives up and reports
/// [`SATSolution::Unknown`].
///
/// Searches check it once per recursion level.
#[derive(Clone, Debug, Default)]
pub struct Interrupt {
    flag: Option<Arc<AtomicBool>>,
    deadline: Option<Instant>,
    max_runs: Option<usize>,
}

impl Interrupt {
    /// Never fires
    pub fn never() -> Interrupt {
        Interrupt::default()
    }

    /// Fires once `flag` is set, e.g. from another thread
    pub fn with_flag(mut self, flag: Arc<AtomicBool>) -> Interrupt {
        self.flag = Some(flag);
        self
    }

    /// Fires at `deadline` or at an earlier deadline already set
    pub fn with_deadline(mut self, deadline: Instant) -> Interrupt {
        self.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Interrupt {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Fires after more than `max_runs` recursive invocations
    pub fn with_max_runs(mut self, max_runs: usize) -> Interrupt {
        self.max_runs = Some(self.max_runs.map_or(max_runs, |current| current.min(max_runs)));
        self
    }

    pub fn should_stop(&self, runs: usize) -> bool {
        self.max_runs.map_or(false, |max_runs| runs > max_runs)
            || self.flag.as_ref().map_or(false, |flag| flag.load(Ordering::Relaxed))
            || self.deadline.map_or(false, |deadline| Instant::now() >= deadline)
    }
}

/// A solver whose search can be cut short
#[auto_impl(&mut, Box)]
pub trait InterruptibleSolver {
    fn solve_interruptible(&mut self, formula: &Formula, interrupt: &Interrupt) -> Result<SATSolution>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_fires() {
        assert!(!Interrupt::never().should_stop(usize::MAX));
    }

    #[test]
    fn run_budget() {
        let interrupt = Interrupt::never().with_max_runs(10).with_max_runs(20);
        assert!(!interrupt.should_stop(10));
        assert!(interrupt.should_stop(11));
    }

    #[test]
    fn flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let interrupt = Interrupt::never().with_flag(flag.clone());
        assert!(!interrupt.should_stop(0));
        flag.store(true, Ordering::Relaxed);
        assert!(interrupt.should_stop(0));
    }

    #[test]
    fn earliest_deadline_wins() {
        let interrupt = Interrupt::never()
            .with_timeout(Duration::from_secs(3600))
            .with_deadline(Instant::now());
        assert!(interrupt.should_stop(0));
    }
}
