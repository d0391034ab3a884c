use std::convert::TryFrom;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::ops::Not;

use dimacs::parse_dimacs;
use itertools::Itertools;

use crate::util::IndexSet;
use crate::{Error, Result};

/// Type used for referencing logical variables
pub type VarId = usize;

/// Largest variable id, so that every literal has a signed integer form
pub const MAX_VAR_ID: VarId = i32::MAX as VarId;

/// Logical literal, a variable or its negation.
///
/// The variable id always lies in `1..=MAX_VAR_ID`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    id: VarId,
    /// Literal is negated iff `sign == false`
    sign: bool,
}

/// Representation of a clause (disjunction of literals).
///
/// Literals are kept sorted by variable and deduplicated, so two clauses
/// are equal exactly when they contain the same literals.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Clause {
    literals: Vec<Literal>,
}

/// Representation of logical formulae in CNF form
/// (conjunction of clauses).
///
/// A formula never changes after construction, [`Formula::assign`]
/// returns a new one. Equality and hashing only look at the clauses,
/// the variable set is derived from them.
#[derive(Clone, Debug)]
pub struct Formula {
    clauses: Vec<Clause>,
    /// Every variable occurring in `clauses`, in order of first appearance
    variables: IndexSet<VarId>,
}

impl Literal {
    /// Creates a literal with given identifier and positivity.
    ///
    /// Fails with [`Error::InvalidVariable`] unless `1 <= id <= MAX_VAR_ID`.
    pub fn new(id: VarId, sign: bool) -> Result<Literal> {
        if id == 0 || id > MAX_VAR_ID {
            return Err(Error::InvalidVariable(id as u64));
        }
        Ok(Literal { id, sign })
    }

    /// Positive literal of a variable taken from an existing formula
    pub(crate) fn pos(id: VarId) -> Literal {
        Literal { id, sign: true }
    }

    /// Negative literal of a variable taken from an existing formula
    pub(crate) fn neg(id: VarId) -> Literal {
        Literal { id, sign: false }
    }

    /// Gets the identifier of the variable
    pub fn id(&self) -> VarId {
        self.id
    }

    /// Checks if the literal is positive
    pub fn sign(&self) -> bool {
        self.sign
    }

    /// Reads a signed integer literal. The absolute value is the variable,
    /// the sign is the polarity.
    pub fn from_i32(literal: i32) -> Result<Literal> {
        match literal.checked_abs() {
            Some(id) if id > 0 => Ok(Literal { id: id as VarId, sign: literal > 0 }),
            _ => Err(Error::InvalidLiteral(literal as i64)),
        }
    }

    /// Converts to signed integer. The absolute value indicates
    /// the identifier and sign states for positivity.
    pub fn to_i32(&self) -> i32 {
        // ids never exceed i32::MAX
        if self.sign {
            self.id as i32
        } else {
            -(self.id as i32)
        }
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Literal {
        Literal { id: self.id, sign: !self.sign }
    }
}

impl Clause {
    /// Creates a clause out of the given literals, dropping duplicates
    pub fn new(literals: impl IntoIterator<Item = Literal>) -> Clause {
        let mut literals: Vec<Literal> = literals.into_iter().collect();
        literals.sort();
        literals.dedup();
        Clause { literals }
    }

    /// Literals of the clause in canonical order
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Literal> {
        self.literals.iter()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// The empty clause stands for `false`
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn contains(&self, literal: &Literal) -> bool {
        self.literals.binary_search(literal).is_ok()
    }

    /// Copy of the clause with `literal` removed
    pub fn without(&self, literal: Literal) -> Clause {
        Clause {
            literals: self.literals.iter()
                .copied()
                .filter(|lit| *lit != literal)
                .collect(),
        }
    }

    /// Signed integer form of the literals
    pub fn to_i32s(&self) -> Vec<i32> {
        self.literals.iter().map(Literal::to_i32).collect()
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        Clause::new(iter)
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Literal;
    type IntoIter = std::slice::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.literals.iter()
    }
}

impl Formula {
    /// Builds a formula from sets of signed integer literals.
    ///
    /// Fails with [`Error::InvalidLiteral`] on a zero literal.
    pub fn new<C, L>(clauses: C) -> Result<Formula>
    where
        C: IntoIterator<Item = L>,
        L: IntoIterator<Item = i32>,
    {
        let clauses = clauses.into_iter()
            .map(|clause| clause.into_iter()
                .map(Literal::from_i32)
                .collect::<Result<Clause>>())
            .collect::<Result<Vec<Clause>>>()?;
        Ok(Formula::from_clauses(clauses))
    }

    /// Creates a formula out of clauses, whose literals are valid by construction
    pub fn from_clauses(clauses: Vec<Clause>) -> Formula {
        let variables = clauses.iter()
            .flat_map(|clause| clause.iter().map(Literal::id))
            .collect();
        Formula { clauses, variables }
    }

    /// Creates a formula without clauses, which is trivially true
    pub fn empty() -> Formula {
        Formula::from_clauses(Vec::new())
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Variables of the formula in order of first appearance
    pub fn variables(&self) -> &IndexSet<VarId> {
        &self.variables
    }

    /// Number of distinct variables
    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    /// Number of clauses
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// A formula without clauses is true
    pub fn is_satisfied(&self) -> bool {
        self.clauses.is_empty()
    }

    /// A formula containing the empty clause is false
    pub fn is_conflicted(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    /// Sets `literal` to true and simplifies.
    ///
    /// Clauses containing `literal` are dropped, `!literal` is removed from
    /// the remaining ones, which may leave an empty clause behind.
    pub fn assign(&self, literal: Literal) -> Result<Formula> {
        if !self.variables.contains(&literal.id) {
            return Err(Error::UnknownVariable(literal.id));
        }

        let negated = !literal;
        let mut occurred = false;
        let clauses: Vec<Clause> = self.clauses.iter()
            .filter_map(|clause| {
                if clause.contains(&literal) {
                    occurred = true;
                    None
                } else if clause.contains(&negated) {
                    occurred = true;
                    Some(clause.without(negated))
                } else {
                    Some(clause.clone())
                }
            }).collect();

        if !occurred {
            return Err(Error::VariableAbsent(literal.id));
        }
        Ok(Formula::from_clauses(clauses))
    }

    /// Assigns the literals one after another
    pub fn apply<'a>(&self, literals: impl IntoIterator<Item = &'a Literal>) -> Result<Formula> {
        literals.into_iter()
            .try_fold(self.clone(), |formula, literal| formula.assign(*literal))
    }

    /// The clauses as sets of signed integers, accepted back by [`Formula::new`]
    pub fn to_literal_sets(&self) -> Vec<Vec<i32>> {
        self.clauses.iter().map(Clause::to_i32s).collect()
    }

    /// Prints formula in DIMACS compatible form
    pub fn to_dimacs(&self) -> String {
        let max_var = self.variables.iter().copied().max().unwrap_or(0);
        let mut out = format!("p cnf {} {}\n", max_var, self.clauses.len());

        for clause in &self.clauses {
            for literal in clause {
                out.push_str(&literal.to_i32().to_string());
                out.push(' ');
            }
            out.push_str("0\n");
        }
        out
    }

    /// Parse DIMACS string into a formula
    pub fn from_dimacs(input: &str) -> Result<Formula> {
        match parse_dimacs(input) {
            Ok(dimacs::Instance::Cnf { clauses, .. }) =>
                clauses.iter()
                    .map(|clause| clause.lits().iter()
                        .map(|lit| {
                            let raw = lit.var().to_u64();
                            let id = VarId::try_from(raw).map_err(|_| Error::InvalidVariable(raw))?;
                            Literal::new(id, lit.sign() == dimacs::Sign::Pos)
                        })
                        .collect::<Result<Clause>>())
                    .collect::<Result<Formula>>(),
            Ok(_) => Err(Error::Dimacs("only CNF formulae are supported".to_string())),
            Err(err) => Err(Error::Dimacs(format!("{:?}", err))),
        }
    }
}

impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        self.clauses == other.clauses
    }
}

impl Eq for Formula {}

impl Hash for Formula {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.clauses.hash(state)
    }
}

impl FromIterator<Clause> for Formula {
    fn from_iter<I: IntoIterator<Item = Clause>>(iter: I) -> Self {
        Formula::from_clauses(iter.into_iter().collect())
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.is_satisfied() {
            "TRUE"
        } else if self.is_conflicted() {
            "FALSE"
        } else {
            "???"
        };
        write!(f, "{}:[{}]", prefix, self.clauses.iter().join(", "))
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.literals.iter().join(", "))
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_i32())
    }
}
