use std::fmt;

use itertools::Itertools;

use crate::Literal;

const MAX_LITERALS_PER_LINE: usize = 8;

/// Outcome of a search
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SATSolution {
    /// Literals in the order the search fixed them, at most one per variable
    Satisfiable(Vec<Literal>),
    Unsatisfiable,
    /// The search was interrupted before reaching an answer
    Unknown,
}

impl SATSolution {
    pub fn is_sat(&self) -> bool {
        matches!(self, SATSolution::Satisfiable(_))
    }

    pub fn is_unsat(&self) -> bool {
        matches!(self, SATSolution::Unsatisfiable)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, SATSolution::Unknown)
    }

    /// The satisfying literals, if any
    pub fn assignment(&self) -> Option<&[Literal]> {
        match self {
            SATSolution::Satisfiable(literals) => Some(literals.as_slice()),
            _ => None,
        }
    }

    pub fn to_dimacs(&self) -> String {
        match self {
            SATSolution::Unsatisfiable => "s UNSATISFIABLE\n".to_string(),
            SATSolution::Unknown => "s UNKNOWN\n".to_string(),
            SATSolution::Satisfiable(literals) if literals.is_empty() => "s SATISFIABLE\nv 0\n".to_string(),
            SATSolution::Satisfiable(literals) => {
                let mut out = String::from("s SATISFIABLE\n");
                let lines = literals.chunks(MAX_LITERALS_PER_LINE).collect_vec();
                for (index, line) in lines.iter().enumerate() {
                    out.push_str("v ");
                    out.push_str(&line.iter().join(" "));
                    if index + 1 == lines.len() {
                        out.push_str(" 0");
                    }
                    out.push('\n');
                }
                out
            }
        }
    }
}

impl fmt::Display for SATSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SATSolution::Unsatisfiable => write!(f, "Unsatisfiable"),
            SATSolution::Unknown => write!(f, "Unknown"),
            SATSolution::Satisfiable(literals) =>
                write!(f, "Satisfiable: [{}]", literals.iter().join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimacs_output() {
        assert_eq!(SATSolution::Unsatisfiable.to_dimacs(), "s UNSATISFIABLE\n");
        assert_eq!(SATSolution::Unknown.to_dimacs(), "s UNKNOWN\n");
        assert_eq!(SATSolution::Satisfiable(vec![]).to_dimacs(), "s SATISFIABLE\nv 0\n");

        let literals = (1..=10).map(|id| Literal::new(id, id % 3 != 0).unwrap()).collect();
        assert_eq!(
            SATSolution::Satisfiable(literals).to_dimacs(),
            "s SATISFIABLE\nv 1 2 -3 4 5 -6 7 8\nv -9 10 0\n"
        );
    }

    #[test]
    fn display() {
        let solution = SATSolution::Satisfiable(vec![Literal::neg(2), Literal::pos(1)]);
        assert_eq!(solution.to_string(), "Satisfiable: [-2, 1]");
        assert_eq!(solution.assignment(), Some(&[Literal::neg(2), Literal::pos(1)][..]));
        assert!(SATSolution::Unknown.assignment().is_none());
    }
}
