/// The CNF representation of a formula
pub mod cnf;
/// The Solver trait which has to be implemented by each solver
pub mod sat_solver;
/// Module that contains the DPLL search
mod dpll;
/// Module that specifies the output of a solver
mod sat_solution;
pub mod bruteforce;
/// Branching heuristics one can choose from to customize the [`SatisfactionSolver`].
mod branching_strategy;
/// Wrappers adding interruption, time limits and timing to solvers.
pub mod solvers;
/// Conversion of formulae into syntax trees for structural encoders
pub mod tree;
/// Interfaces of external scoring and canonicalization models
pub mod oracle;
/// Random formulae for tests, benchmarks and datasets
pub mod generation;
mod error;
mod log;
mod util;

pub use cnf::{Clause, Formula, Literal, VarId, MAX_VAR_ID};
pub use sat_solver::{check_assignment, Solver};
pub use bruteforce::Bruteforce;
pub use branching_strategy::{
    BranchingStrategy, EmbeddingGuided, FirstVariable, HeuristicKind, MostCommonLiteral,
    RandomClauseLiteral, RandomVariable,
};
pub use dpll::SatisfactionSolver;
pub use error::{Error, Result};
pub use sat_solution::SATSolution;
pub use tree::{Combination, SyntaxTree};
pub use oracle::{EquivalenceCanonicalizer, SimilarityOracle};
