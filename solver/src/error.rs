use thiserror::Error;

use crate::cnf::VarId;

/// Faults reported by formula construction, simplification, tree building
/// and formula generation.
///
/// An unsatisfiable formula is not an error; it is reported as
/// [`SATSolution::Unsatisfiable`](crate::SATSolution::Unsatisfiable).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A literal was zero or its absolute value does not fit a variable id.
    #[error("{0} is not a valid literal, literals are nonzero integers")]
    InvalidLiteral(i64),

    /// A variable id is zero or too large for the signed integer form.
    #[error("{0} is not a valid variable, ids range from 1 to 2147483647")]
    InvalidVariable(u64),

    /// A literal refers to a variable that does not occur in the formula.
    #[error("variable {0} does not occur in the formula")]
    UnknownVariable(VarId),

    /// Assignment found neither polarity of the variable in any clause.
    #[error("neither polarity of variable {0} occurs in any clause")]
    VariableAbsent(VarId),

    /// Only the variables `1..=26` have a letter in the tree encoding.
    #[error("variable {0} has no letter, only variables 1 to 26 can be encoded")]
    AlphabetOverflow(VarId),

    /// A tree was requested for a formula without clauses.
    #[error("a formula without clauses has no tree")]
    EmptyFormula,

    /// A tree was requested for the empty clause.
    #[error("the empty clause has no tree")]
    EmptyClause,

    /// A branching strategy was asked for a literal of a formula that is
    /// already satisfied or conflicted.
    #[error("the formula has no variable to branch on")]
    NothingToBranchOn,

    /// The DIMACS input could not be parsed.
    #[error("DIMACS input: {0}")]
    Dimacs(String),

    /// Parameters for random formula generation are inconsistent.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
