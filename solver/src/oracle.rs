//! Interfaces of the models the search consults but does not own.
//!
//! A [`SimilarityOracle`] scores syntax trees, e.g. by the distance of their
//! embedding to the embedding of an always false formula. An
//! [`EquivalenceCanonicalizer`] names the equivalence class of a formula
//! and is used to group formulae that mean the same thing.

use auto_impl::auto_impl;

use crate::tree::SyntaxTree;
use crate::util::IndexMap;
use crate::{Clause, Error, Formula, Literal, Result};

/// Scores a formula tree. Lower is closer to `false`.
///
/// Implementations are loaded once and only read afterwards, the search
/// calls them from several threads at once.
#[auto_impl(&, Box)]
pub trait SimilarityOracle: Send + Sync {
    fn score(&self, tree: &SyntaxTree) -> f64;
}

/// Maps a formula to a key shared by all formulae equivalent to it
#[auto_impl(&, Box)]
pub trait EquivalenceCanonicalizer {
    fn canonical_form(&self, clauses: &[Clause]) -> Result<String>;
}

/// Adapts a closure into a [`SimilarityOracle`]
pub struct FnOracle<F>(pub F);

impl<F> SimilarityOracle for FnOracle<F>
where
    F: Fn(&SyntaxTree) -> f64 + Send + Sync,
{
    fn score(&self, tree: &SyntaxTree) -> f64 {
        (self.0)(tree)
    }
}

/// Stand-in for a trained model: smaller trees score lower.
pub struct TreeSizeOracle;

impl SimilarityOracle for TreeSizeOracle {
    fn score(&self, tree: &SyntaxTree) -> f64 {
        tree.size() as f64
    }
}

/// Keys a formula by its truth table over the variables `1..=n`, where `n`
/// is the larger of `num_variables` and the highest variable in the clauses.
///
/// Exact, but exponential in `n`, so `n` is capped at
/// [`TruthTableCanonicalizer::MAX_VARIABLES`].
pub struct TruthTableCanonicalizer {
    pub num_variables: usize,
}

impl TruthTableCanonicalizer {
    /// Largest table is `2^24` characters
    pub const MAX_VARIABLES: usize = 24;
}

impl EquivalenceCanonicalizer for TruthTableCanonicalizer {
    fn canonical_form(&self, clauses: &[Clause]) -> Result<String> {
        let num_variables = clauses.iter()
            .flat_map(|clause| clause.iter().map(Literal::id))
            .max()
            .unwrap_or(0)
            .max(self.num_variables);

        if num_variables > Self::MAX_VARIABLES {
            return Err(Error::InvalidParameters(format!(
                "truth table over {} variables, at most {} are supported",
                num_variables,
                Self::MAX_VARIABLES
            )));
        }

        // variable ids start at 1, so `id - 1` is the bit of the valuation
        Ok((0..1u32 << num_variables)
            .map(|valuation| {
                let holds = clauses.iter().all(|clause| clause.iter()
                    .any(|literal| ((valuation >> (literal.id() - 1)) & 1 == 1) == literal.sign()));
                if holds { '1' } else { '0' }
            })
            .collect())
    }
}

/// Groups formulae by their canonical form, keys in order of first appearance
pub fn group_equivalent<I, C>(formulas: I, canonicalizer: &C) -> Result<IndexMap<String, Vec<Formula>>>
where
    I: IntoIterator<Item = Formula>,
    C: EquivalenceCanonicalizer + ?Sized,
{
    let mut groups: IndexMap<String, Vec<Formula>> = IndexMap::default();
    for formula in formulas {
        groups.entry(canonicalizer.canonical_form(formula.clauses())?)
            .or_insert_with(Vec::new)
            .push(formula);
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{formula_to_tree, Combination};

    fn formula(clauses: Vec<Vec<i32>>) -> Formula {
        Formula::new(clauses).unwrap()
    }

    #[test]
    fn tree_size_oracle() {
        let f = formula(vec![vec![1, -2]]);
        let tree = formula_to_tree(f.clauses(), Combination::Sequential).unwrap();
        assert_eq!(TreeSizeOracle.score(&tree), 5.0);
    }

    #[test]
    fn closure_oracle() {
        let oracle = FnOracle(|tree: &SyntaxTree| tree.depth() as f64 * 0.5);
        let f = formula(vec![vec![3]]);
        let tree = formula_to_tree(f.clauses(), Combination::Sequential).unwrap();
        assert_eq!(oracle.score(&tree), 1.0);
        assert_eq!((&oracle).score(&tree), 1.0);
    }

    #[test]
    fn truth_table() {
        let canonicalizer = TruthTableCanonicalizer { num_variables: 2 };
        // valuations enumerate variable 1 as the lowest bit
        assert_eq!(canonicalizer.canonical_form(formula(vec![vec![1]]).clauses()).unwrap(), "0101");
        assert_eq!(canonicalizer.canonical_form(formula(vec![vec![1, 2]]).clauses()).unwrap(), "0111");
        assert_eq!(canonicalizer.canonical_form(&[]).unwrap(), "1111");
    }

    #[test]
    fn truth_table_too_wide() {
        let canonicalizer = TruthTableCanonicalizer { num_variables: 0 };
        assert!(matches!(
            canonicalizer.canonical_form(formula(vec![vec![64]]).clauses()),
            Err(Error::InvalidParameters(_))
        ));
        assert!(matches!(
            TruthTableCanonicalizer { num_variables: 100 }.canonical_form(&[]),
            Err(Error::InvalidParameters(_))
        ));
        assert!(matches!(
            group_equivalent(vec![formula(vec![vec![1]]), formula(vec![vec![30]])], &canonicalizer),
            Err(Error::InvalidParameters(_))
        ));

        let widest = TruthTableCanonicalizer::MAX_VARIABLES as i32;
        let table = canonicalizer.canonical_form(formula(vec![vec![-widest]]).clauses()).unwrap();
        assert_eq!(table.len(), 1 << widest);
        assert!(table.starts_with('1') && table.ends_with('0'));
    }

    #[test]
    fn grouping_by_equivalence() {
        let canonicalizer = TruthTableCanonicalizer { num_variables: 2 };
        let groups = group_equivalent(vec![
            formula(vec![vec![1, 2]]),
            formula(vec![vec![-1]]),
            formula(vec![vec![2, 1], vec![1, 2, -2]]),
            formula(vec![vec![1], vec![-1]]),
            formula(vec![vec![2], vec![-2]]),
        ], &canonicalizer).unwrap();

        let sizes: Vec<usize> = groups.values().map(Vec::len).collect();
        assert_eq!(sizes, vec![2, 1, 2]);
        assert_eq!(groups.get_index(2).map(|(key, _)| key.as_str()), Some("0000"));
    }
}
