//! Conversion of CNF formulae into binary syntax trees.
//!
//! The trees feed a structural encoder, so their shape has to be stable:
//! the same formula must always produce the same tree for a fixed
//! [`Combination`].

use std::fmt;
use std::str::FromStr;

use crate::log::targets;
use crate::{Clause, Error, Literal, Result, VarId};

/// Number of variables that have a letter
const ALPHABET_SIZE: VarId = 26;

/// Syntax tree of a formula in the node kinds understood by the encoder
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxTree {
    /// Synthetic root above the whole formula
    Start(Box<SyntaxTree>),
    And(Box<SyntaxTree>, Box<SyntaxTree>),
    Or(Box<SyntaxTree>, Box<SyntaxTree>),
    Not(Box<SyntaxTree>),
    Literal(char),
}

/// How lists of operands are folded into binary nodes.
///
/// Both produce logically equivalent trees of different shape, so one
/// of them has to be fixed per dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Combination {
    /// `[x, y, z]` becomes `Op(x, Op(y, z))`
    Sequential,
    /// Operands are split in halves at `len / 2`, recursively
    Balanced,
}

impl Default for Combination {
    fn default() -> Self {
        Combination::Sequential
    }
}

impl FromStr for Combination {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "sequential" => Ok(Combination::Sequential),
            "balanced" => Ok(Combination::Balanced),
            _ => Err(format!("unknown combination strategy '{}'", s)),
        }
    }
}

impl SyntaxTree {
    fn and(left: SyntaxTree, right: SyntaxTree) -> SyntaxTree {
        SyntaxTree::And(Box::new(left), Box::new(right))
    }

    fn or(left: SyntaxTree, right: SyntaxTree) -> SyntaxTree {
        SyntaxTree::Or(Box::new(left), Box::new(right))
    }

    /// Children in left to right order
    pub fn children(&self) -> Vec<&SyntaxTree> {
        match self {
            SyntaxTree::Start(child) | SyntaxTree::Not(child) => vec![&**child],
            SyntaxTree::And(left, right) | SyntaxTree::Or(left, right) => vec![&**left, &**right],
            SyntaxTree::Literal(_) => vec![],
        }
    }

    /// Number of nodes, the root included
    pub fn size(&self) -> usize {
        1 + self.children().into_iter().map(SyntaxTree::size).sum::<usize>()
    }

    /// Length of the longest path from the root to a leaf, counted in nodes
    pub fn depth(&self) -> usize {
        1 + self.children().into_iter().map(SyntaxTree::depth).max().unwrap_or(0)
    }

    /// Infix form, e.g. `(a | ~b) & c`, as accepted by symbolic simplifiers
    pub fn to_expression(&self) -> String {
        let mut out = String::new();
        self.write_expression(&mut out);
        out
    }

    fn write_expression(&self, out: &mut String) {
        match self {
            SyntaxTree::Start(child) => child.write_expression(out),
            SyntaxTree::Literal(letter) => out.push(*letter),
            SyntaxTree::Not(child) => {
                out.push('~');
                child.write_operand(out);
            }
            SyntaxTree::And(left, right) | SyntaxTree::Or(left, right) => {
                let operator = if let SyntaxTree::And(..) = self { " & " } else { " | " };
                left.write_operand(out);
                out.push_str(operator);
                right.write_operand(out);
            }
        }
    }

    fn write_operand(&self, out: &mut String) {
        match self {
            SyntaxTree::And(..) | SyntaxTree::Or(..) => {
                out.push('(');
                self.write_expression(out);
                out.push(')');
            }
            _ => self.write_expression(out),
        }
    }
}

impl fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxTree::Start(child) => write!(f, "Start({})", child),
            SyntaxTree::And(left, right) => write!(f, "And({}, {})", left, right),
            SyntaxTree::Or(left, right) => write!(f, "Or({}, {})", left, right),
            SyntaxTree::Not(child) => write!(f, "Not({})", child),
            SyntaxTree::Literal(letter) => write!(f, "{}", letter),
        }
    }
}

/// Maps variable `v` to the `v`-th letter, negated literals get a `Not` above
pub fn literal_to_tree(literal: Literal) -> Result<SyntaxTree> {
    if literal.id() > ALPHABET_SIZE {
        return Err(Error::AlphabetOverflow(literal.id()));
    }
    let letter = (b'a' + (literal.id() - 1) as u8) as char;
    let leaf = SyntaxTree::Literal(letter);

    Ok(if literal.sign() {
        leaf
    } else {
        SyntaxTree::Not(Box::new(leaf))
    })
}

/// Folds the literals of a clause into `Or` nodes
pub fn clause_to_tree(clause: &Clause, combination: Combination) -> Result<SyntaxTree> {
    let leaves = clause.iter()
        .map(|literal| literal_to_tree(*literal))
        .collect::<Result<Vec<_>>>()?;
    combine(leaves, combination, SyntaxTree::or).ok_or(Error::EmptyClause)
}

/// Folds the clause trees into `And` nodes under a `Start` root.
///
/// A formula without clauses is true and has no tree, callers have to
/// check [`Formula::is_satisfied`](crate::Formula::is_satisfied) first.
pub fn formula_to_tree(clauses: &[Clause], combination: Combination) -> Result<SyntaxTree> {
    let trees = clauses.iter()
        .map(|clause| clause_to_tree(clause, combination))
        .collect::<Result<Vec<_>>>()?;
    let body = combine(trees, combination, SyntaxTree::and).ok_or(Error::EmptyFormula)?;

    log::trace!(target: targets::TREE, "Built tree of {} clauses: {}", clauses.len(), body);
    Ok(SyntaxTree::Start(Box::new(body)))
}

type Join = fn(SyntaxTree, SyntaxTree) -> SyntaxTree;

fn combine(mut nodes: Vec<SyntaxTree>, combination: Combination, join: Join) -> Option<SyntaxTree> {
    match combination {
        Combination::Sequential => {
            let last = nodes.pop()?;
            Some(nodes.into_iter()
                .rev()
                .fold(last, |acc, node| join(node, acc)))
        }
        Combination::Balanced => bisect(nodes, join),
    }
}

fn bisect(mut nodes: Vec<SyntaxTree>, join: Join) -> Option<SyntaxTree> {
    match nodes.len() {
        0 => None,
        1 => nodes.pop(),
        n => {
            let right = nodes.split_off(n / 2);
            Some(join(bisect(nodes, join)?, bisect(right, join)?))
        }
    }
}
