use auto_impl::auto_impl;
use rayon::prelude::*;

use crate::{Formula, Literal, Result, SATSolution};

/// Common interface of everything that decides formulae
#[auto_impl(&mut, Box)]
pub trait Solver {
    fn solve(&mut self, formula: &Formula) -> Result<SATSolution>;
}

/// Checks that every clause contains one of the given literals
pub fn check_assignment(formula: &Formula, assignment: &[Literal]) -> bool {
    formula.clauses().par_iter()
        .all(|clause| assignment.iter().any(|literal| clause.contains(literal)))
}
