use std::str::FromStr;

use auto_impl::auto_impl;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::log::targets;
use crate::oracle::SimilarityOracle;
use crate::tree::{formula_to_tree, Combination};
use crate::util::IndexMap;
use crate::{Error, Formula, Literal, Result};

/// Picks the literal the search tries first.
///
/// Only called on formulae that are neither satisfied nor conflicted,
/// and the returned literal has to belong to a variable of the formula.
#[auto_impl(&mut, Box)]
pub trait BranchingStrategy {
    fn suggest(&mut self, formula: &Formula) -> Result<Literal>;
}

/// Names of the strategies, e.g. for command line configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeuristicKind {
    FirstVariable,
    RandomVariable,
    RandomClauseLiteral,
    MostCommonLiteral,
    EmbeddingGuided,
}

impl HeuristicKind {
    pub const NAMES: [&'static str; 5] =
        ["first", "random-var", "random-clause", "most-common", "embedding"];
}

impl FromStr for HeuristicKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "first" => Ok(HeuristicKind::FirstVariable),
            "random-var" => Ok(HeuristicKind::RandomVariable),
            "random-clause" => Ok(HeuristicKind::RandomClauseLiteral),
            "most-common" => Ok(HeuristicKind::MostCommonLiteral),
            "embedding" => Ok(HeuristicKind::EmbeddingGuided),
            _ => Err(format!("unknown branching heuristic '{}'", s)),
        }
    }
}

/// Positive literal of the first variable of the formula
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstVariable;

impl BranchingStrategy for FirstVariable {
    fn suggest(&mut self, formula: &Formula) -> Result<Literal> {
        formula.variables()
            .get_index(0)
            .map(|&id| Literal::pos(id))
            .ok_or(Error::NothingToBranchOn)
    }
}

/// Uniformly random variable with a uniformly random sign
#[derive(Clone, Debug)]
pub struct RandomVariable {
    rng: StdRng,
}

impl RandomVariable {
    pub fn new() -> Self {
        RandomVariable { rng: StdRng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> Self {
        RandomVariable { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for RandomVariable {
    fn default() -> Self {
        RandomVariable::new()
    }
}

impl BranchingStrategy for RandomVariable {
    fn suggest(&mut self, formula: &Formula) -> Result<Literal> {
        let variables = formula.variables();
        if variables.is_empty() {
            return Err(Error::NothingToBranchOn);
        }
        let index = self.rng.gen_range(0, variables.len());
        let id = *variables.get_index(index).ok_or(Error::NothingToBranchOn)?;
        Literal::new(id, self.rng.gen())
    }
}

/// Uniformly random literal of a uniformly random clause.
///
/// The sign is taken over from the clause, not drawn.
#[derive(Clone, Debug)]
pub struct RandomClauseLiteral {
    rng: StdRng,
}

impl RandomClauseLiteral {
    pub fn new() -> Self {
        RandomClauseLiteral { rng: StdRng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> Self {
        RandomClauseLiteral { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for RandomClauseLiteral {
    fn default() -> Self {
        RandomClauseLiteral::new()
    }
}

impl BranchingStrategy for RandomClauseLiteral {
    fn suggest(&mut self, formula: &Formula) -> Result<Literal> {
        let rng = &mut self.rng;
        formula.clauses()
            .choose(rng)
            .and_then(|clause| clause.literals().choose(rng))
            .copied()
            .ok_or(Error::NothingToBranchOn)
    }
}

/// The literal occurring in the most clauses, counted with sign.
///
/// Ties go to the literal seen first when scanning the clauses in order.
#[derive(Clone, Copy, Debug, Default)]
pub struct MostCommonLiteral;

impl BranchingStrategy for MostCommonLiteral {
    fn suggest(&mut self, formula: &Formula) -> Result<Literal> {
        let mut counts: IndexMap<Literal, usize> = IndexMap::default();
        for literal in formula.clauses().iter().flat_map(|clause| clause.iter()) {
            *counts.entry(*literal).or_insert(0) += 1;
        }

        // max_by_key keeps the last maximum, reversing makes it the first one
        counts.into_iter()
            .rev()
            .max_by_key(|(_, count)| *count)
            .map(|(literal, _)| literal)
            .ok_or(Error::NothingToBranchOn)
    }
}

/// Tries every literal one step ahead and asks the oracle which of the
/// simplified formulae is closest to `false`.
///
/// A literal that satisfies the formula outright is taken at once. Literals
/// leading straight into a conflict are only used if nothing else is left.
pub struct EmbeddingGuided<O> {
    oracle: O,
    combination: Combination,
}

impl<O: SimilarityOracle> EmbeddingGuided<O> {
    pub fn new(oracle: O) -> Self {
        EmbeddingGuided { oracle, combination: Combination::default() }
    }

    /// Uses `combination` for the trees handed to the oracle
    pub fn with_combination(oracle: O, combination: Combination) -> Self {
        EmbeddingGuided { oracle, combination }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }
}

impl<O: SimilarityOracle> BranchingStrategy for EmbeddingGuided<O> {
    fn suggest(&mut self, formula: &Formula) -> Result<Literal> {
        let mut fallback = None;
        let mut candidates = Vec::with_capacity(2 * formula.num_vars());

        for &id in formula.variables() {
            for &literal in &[Literal::pos(id), Literal::neg(id)] {
                let reduced = formula.assign(literal)?;
                if reduced.is_satisfied() {
                    log::trace!(target: targets::BRANCHING, "{} satisfies the formula", literal);
                    return Ok(literal);
                }
                if reduced.is_conflicted() {
                    fallback.get_or_insert(literal);
                    continue;
                }
                candidates.push((literal, formula_to_tree(reduced.clauses(), self.combination)?));
            }
        }

        let oracle = &self.oracle;
        let scores: Vec<f64> = candidates.par_iter()
            .map(|(_, tree)| oracle.score(tree))
            .collect();

        let mut best: Option<(Literal, f64)> = None;
        for ((literal, _), score) in candidates.iter().zip(scores) {
            if score.is_nan() {
                continue;
            }
            match best {
                Some((_, min)) if min <= score => {}
                _ => best = Some((*literal, score)),
            }
        }

        match best {
            Some((literal, score)) => {
                log::trace!(target: targets::BRANCHING, "Oracle picked {} with score {}", literal, score);
                Ok(literal)
            }
            None => {
                // no usable score
                candidates.first()
                    .map(|(literal, _)| *literal)
                    .or(fallback)
                    .ok_or(Error::NothingToBranchOn)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{FnOracle, TreeSizeOracle};
    use crate::tree::SyntaxTree;

    fn formula(clauses: Vec<Vec<i32>>) -> Formula {
        Formula::new(clauses).unwrap()
    }

    #[test]
    fn first_variable() {
        let f = formula(vec![vec![-3, 2], vec![1]]);
        assert_eq!(FirstVariable.suggest(&f), Ok(Literal::pos(2)));
        assert_eq!(FirstVariable.suggest(&Formula::empty()), Err(Error::NothingToBranchOn));
    }

    #[test]
    fn random_variable_stays_in_formula() {
        let f = formula(vec![vec![1, -4], vec![7, 4]]);
        let mut strategy = RandomVariable::seeded(3);
        for _ in 0..50 {
            let literal = strategy.suggest(&f).unwrap();
            assert!(f.variables().contains(&literal.id()));
        }
    }

    #[test]
    fn random_variable_is_reproducible() {
        let f = formula(vec![vec![1, 2, 3, 4, 5, 6]]);
        let mut first = RandomVariable::seeded(11);
        let mut second = RandomVariable::seeded(11);
        for _ in 0..20 {
            assert_eq!(first.suggest(&f), second.suggest(&f));
        }
    }

    #[test]
    fn random_clause_literal_keeps_sign() {
        let f = formula(vec![vec![-1, -2], vec![-3]]);
        let mut strategy = RandomClauseLiteral::seeded(5);
        for _ in 0..50 {
            assert!(!strategy.suggest(&f).unwrap().sign());
        }
    }

    #[test]
    fn most_common_unique_maximum() {
        let f = formula(vec![vec![1, -2], vec![-2, 3], vec![-2, -1], vec![1]]);
        assert_eq!(MostCommonLiteral.suggest(&f), Ok(Literal::neg(2)));
    }

    #[test]
    fn most_common_tie_goes_to_first_seen() {
        let f = formula(vec![vec![3, 4], vec![4, 3], vec![1]]);
        assert_eq!(MostCommonLiteral.suggest(&f), Ok(Literal::pos(3)));

        let g = formula(vec![vec![-5], vec![2], vec![2, -5]]);
        assert_eq!(MostCommonLiteral.suggest(&g), Ok(Literal::neg(5)));
    }

    #[test]
    fn embedding_takes_satisfying_literal() {
        let f = formula(vec![vec![1, 2], vec![2, -3]]);
        let mut strategy = EmbeddingGuided::new(FnOracle(|_: &SyntaxTree| 0.0));
        assert_eq!(strategy.suggest(&f), Ok(Literal::pos(2)));
    }

    #[test]
    fn embedding_picks_lowest_score() {
        let f = formula(vec![vec![1, 2], vec![-1, 3], vec![-2, -3]]);
        // the formula left over after assigning -1
        let oracle = FnOracle(|tree: &SyntaxTree| {
            if tree.to_expression() == "b & (~b | ~c)" { 0.0 } else { 1.0 }
        });
        let mut strategy = EmbeddingGuided::new(oracle);
        assert_eq!(strategy.suggest(&f), Ok(Literal::neg(1)));
    }

    #[test]
    fn embedding_first_minimum_wins() {
        let f = formula(vec![vec![1, 2], vec![-1, -2]]);
        let mut strategy = EmbeddingGuided::new(TreeSizeOracle);
        // 1 -> [-2], -1 -> [2], 2 -> [-1], -2 -> [1]; both positive leaves are smallest
        assert_eq!(strategy.suggest(&f), Ok(Literal::neg(1)));
    }

    #[test]
    fn embedding_skips_nan_scores() {
        let f = formula(vec![vec![1, 2], vec![-1, -2]]);
        // 1 leaves [-2], whose tree is the first one scored
        let oracle = FnOracle(|tree: &SyntaxTree| {
            if tree.to_expression() == "~b" { f64::NAN } else { tree.size() as f64 }
        });
        let mut strategy = EmbeddingGuided::new(oracle);
        assert_eq!(strategy.suggest(&f), Ok(Literal::neg(1)));

        let mut strategy = EmbeddingGuided::new(FnOracle(|_: &SyntaxTree| f64::NAN));
        assert_eq!(strategy.suggest(&f), Ok(Literal::pos(1)));
    }

    #[test]
    fn embedding_falls_back_to_conflict() {
        let f = formula(vec![vec![1], vec![-1]]);
        let mut strategy = EmbeddingGuided::new(TreeSizeOracle);
        assert_eq!(strategy.suggest(&f), Ok(Literal::pos(1)));
    }

    #[test]
    fn heuristic_names() {
        for name in HeuristicKind::NAMES.iter() {
            assert!(name.parse::<HeuristicKind>().is_ok());
        }
        assert_eq!("embedding".parse::<HeuristicKind>(), Ok(HeuristicKind::EmbeddingGuided));
        assert!("vsids".parse::<HeuristicKind>().is_err());
    }
}
