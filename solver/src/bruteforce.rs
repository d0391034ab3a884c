use crate::sat_solver::*;
use crate::{Formula, Literal, Result, SATSolution};

/// A simple CNF solver that naively checks all possible
/// valuations in order to ensure satisfiability
pub struct Bruteforce;

impl Solver for Bruteforce {
    fn solve(&mut self, formula: &Formula) -> Result<SATSolution> {
        // initial valuation sets all to false
        let mut valuation: Vec<Literal> = formula.variables()
            .iter()
            .map(|&id| Literal::neg(id))
            .collect();

        Ok(if guess(formula, 0, &mut valuation) {
            SATSolution::Satisfiable(valuation)
        } else {
            SATSolution::Unsatisfiable
        })
    }
}

fn guess(formula: &Formula, change: usize, valuation: &mut Vec<Literal>) -> bool {
    if change == valuation.len() {
        check_assignment(formula, valuation)
    } else if guess(formula, change + 1, valuation) {
        true
    } else {
        // flip current variable
        valuation[change] = !valuation[change];
        // try again
        let res = guess(formula, change + 1, valuation);
        if !res {
            // if failed set back to default
            valuation[change] = !valuation[change];
        }
        res
    }
}
