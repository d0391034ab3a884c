use crate::log::targets;
use crate::solvers::{Interrupt, InterruptibleSolver};
use crate::{BranchingStrategy, Formula, Literal, Result, SATSolution, Solver};

/// DPLL without propagation: branch on the literal the strategy suggests,
/// simplify, recurse, and try the opposite literal when that fails.
///
/// Every level removes at least one variable, so the recursion depth is
/// bounded by the number of variables of the formula.
pub struct SatisfactionSolver<B> {
    branching: B,
    runs: usize,
}

/// Result of one recursive call. Decisions are collected deepest first.
enum Search {
    Found(Vec<Literal>),
    Exhausted,
    Interrupted,
}

impl<B: BranchingStrategy> SatisfactionSolver<B> {
    pub fn new(branching: B) -> Self {
        SatisfactionSolver { branching, runs: 0 }
    }

    /// Recursive invocations made by the last search
    pub fn runs(&self) -> usize {
        self.runs
    }

    pub fn branching(&self) -> &B {
        &self.branching
    }

    pub fn branching_mut(&mut self) -> &mut B {
        &mut self.branching
    }

    fn dpll(&mut self, formula: &Formula, interrupt: &Interrupt) -> Result<SATSolution> {
        self.runs = 0;

        let solution = match self.search(formula, interrupt)? {
            Search::Found(mut decisions) => {
                decisions.reverse();
                SATSolution::Satisfiable(decisions)
            }
            Search::Exhausted => SATSolution::Unsatisfiable,
            Search::Interrupted => {
                log::warn!(target: targets::DPLL, "Search interrupted after {} runs", self.runs);
                SATSolution::Unknown
            }
        };

        log::debug!(target: targets::DPLL, "{} after {} runs", solution, self.runs);
        Ok(solution)
    }

    fn search(&mut self, formula: &Formula, interrupt: &Interrupt) -> Result<Search> {
        self.runs += 1;

        if formula.is_satisfied() {
            return Ok(Search::Found(Vec::new()));
        }
        if formula.is_conflicted() {
            return Ok(Search::Exhausted);
        }
        if interrupt.should_stop(self.runs) {
            return Ok(Search::Interrupted);
        }

        let literal = self.branching.suggest(formula)?;
        log::trace!(target: targets::DPLL, "Branching on {} in {}", literal, formula);

        for &choice in &[literal, !literal] {
            match self.search(&formula.assign(choice)?, interrupt)? {
                Search::Found(mut decisions) => {
                    decisions.push(choice);
                    return Ok(Search::Found(decisions));
                }
                Search::Interrupted => return Ok(Search::Interrupted),
                Search::Exhausted => {}
            }
        }
        Ok(Search::Exhausted)
    }
}

impl<B: BranchingStrategy> Solver for SatisfactionSolver<B> {
    fn solve(&mut self, formula: &Formula) -> Result<SATSolution> {
        self.dpll(formula, &Interrupt::never())
    }
}

impl<B: BranchingStrategy> InterruptibleSolver for SatisfactionSolver<B> {
    fn solve_interruptible(&mut self, formula: &Formula, interrupt: &Interrupt) -> Result<SATSolution> {
        self.dpll(formula, interrupt)
    }
}
