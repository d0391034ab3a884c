use rand::seq::index::sample;
use rand::Rng;

use crate::log::targets;
use crate::{Clause, Error, Formula, Literal, Result, MAX_VAR_ID};

/// Draws a random k-SAT formula.
///
/// Every clause consists of `clause_size` distinct variables out of
/// `1..=variable_number`, each with a uniformly random sign.
pub fn random_ksat<R: Rng + ?Sized>(
    rng: &mut R,
    clause_size: usize,
    variable_number: usize,
    clause_number: usize,
) -> Result<Formula> {
    if clause_size == 0 || clause_size > variable_number {
        return Err(Error::InvalidParameters(format!(
            "cannot draw clauses of {} distinct variables out of {}",
            clause_size, variable_number
        )));
    }
    if variable_number > MAX_VAR_ID {
        return Err(Error::InvalidParameters(format!(
            "at most {} variables are supported, got {}",
            MAX_VAR_ID, variable_number
        )));
    }

    let mut clauses = Vec::with_capacity(clause_number);
    for _ in 0..clause_number {
        let variables = sample(rng, variable_number, clause_size);
        let clause: Clause = variables.into_iter()
            .map(|index| Literal::new(index + 1, rng.gen()))
            .collect::<Result<_>>()?;
        clauses.push(clause);
    }

    let formula = Formula::from_clauses(clauses);
    log::trace!(target: targets::GENERATION, "Generated {}", formula);
    Ok(formula)
}

/// Draws `sample_number` formulae with [`random_ksat`]
pub fn random_ksats<R: Rng + ?Sized>(
    rng: &mut R,
    sample_number: usize,
    clause_size: usize,
    variable_number: usize,
    clause_number: usize,
) -> Result<Vec<Formula>> {
    (0..sample_number)
        .map(|_| random_ksat(rng, clause_size, variable_number, clause_number))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn shape_of_generated_formula() {
        let mut rng = StdRng::seed_from_u64(7);
        let formula = random_ksat(&mut rng, 3, 5, 20).unwrap();

        assert_eq!(formula.len(), 20);
        for clause in formula.clauses() {
            assert_eq!(clause.len(), 3);
            let mut ids: Vec<_> = clause.iter().map(Literal::id).collect();
            ids.dedup();
            assert_eq!(ids.len(), 3);
            assert!(ids.iter().all(|id| (1..=5).contains(id)));
        }
    }

    #[test]
    fn same_seed_same_formulae() {
        let first = random_ksats(&mut StdRng::seed_from_u64(42), 4, 2, 4, 6).unwrap();
        let second = random_ksats(&mut StdRng::seed_from_u64(42), 4, 2, 4, 6).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
    }

    #[test]
    fn clauses_larger_than_variables() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            random_ksat(&mut rng, 4, 3, 1),
            Err(Error::InvalidParameters(_))
        ));
        assert!(matches!(
            random_ksat(&mut rng, 0, 3, 1),
            Err(Error::InvalidParameters(_))
        ));
    }

    #[test]
    fn variables_beyond_literal_range() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            random_ksat(&mut rng, 1, MAX_VAR_ID + 1, 1),
            Err(Error::InvalidParameters(_))
        ));
    }
}
