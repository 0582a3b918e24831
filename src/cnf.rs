// CNF: literals, clauses and formulas handed to the SAT backend

use std::fmt::{self, Write};

use crate::csp::Variable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Regular,
    Negated,
}

/// Boolean literal over a 0-based variable index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal {
    pub variable: Variable,
    pub polarity: Polarity,
}

impl Literal {
    pub fn regular(variable: Variable) -> Self {
        Literal { variable, polarity: Polarity::Regular }
    }

    pub fn negated(variable: Variable) -> Self {
        Literal { variable, polarity: Polarity::Negated }
    }

    /// Signed 1-based DIMACS code
    pub fn to_dimacs(self) -> i32 {
        let code = (self.variable + 1) as i32;
        match self.polarity {
            Polarity::Regular => code,
            Polarity::Negated => -code,
        }
    }
}

/// Disjunction of literals
pub type Clause = Vec<Literal>;

/// Conjunction of clauses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cnf {
    clauses: Vec<Clause>,
}

impl Cnf {
    pub fn new(clauses: Vec<Clause>) -> Self {
        Cnf { clauses }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// One past the largest variable mentioned by any literal
    pub fn n_variables(&self) -> usize {
        self.clauses
            .iter()
            .flatten()
            .map(|l| l.variable + 1)
            .max()
            .unwrap_or(0)
    }

    /// DIMACS text: `p cnf` header, one 0-terminated clause per line
    pub fn to_dimacs(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail
        let _ = writeln!(out, "p cnf {} {}", self.n_variables(), self.clauses.len());
        for clause in &self.clauses {
            for lit in clause {
                let _ = write!(out, "{} ", lit.to_dimacs());
            }
            out.push_str("0\n");
        }
        out
    }
}

impl FromIterator<Clause> for Cnf {
    fn from_iter<I: IntoIterator<Item = Clause>>(iter: I) -> Self {
        Cnf::new(iter.into_iter().collect())
    }
}

/// Verdict of a SAT backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Satisfiability {
    Unsatisfiable,
    Satisfiable,
}

impl Satisfiability {
    pub fn is_sat(self) -> bool {
        self == Satisfiability::Satisfiable
    }
}

impl From<bool> for Satisfiability {
    fn from(sat: bool) -> Self {
        if sat {
            Satisfiability::Satisfiable
        } else {
            Satisfiability::Unsatisfiable
        }
    }
}

impl fmt::Display for Satisfiability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Satisfiability::Satisfiable => write!(f, "SATISFIABLE"),
            Satisfiability::Unsatisfiable => write!(f, "UNSATISFIABLE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_dimacs() {
        assert_eq!(Literal::regular(0).to_dimacs(), 1);
        assert_eq!(Literal::negated(0).to_dimacs(), -1);
        assert_eq!(Literal::negated(41).to_dimacs(), -42);
    }

    #[test]
    fn test_cnf_n_variables() {
        let cnf = Cnf::new(vec![
            vec![Literal::regular(0), Literal::negated(4)],
            vec![Literal::regular(2)],
        ]);
        assert_eq!(cnf.n_variables(), 5);
        assert_eq!(cnf.len(), 2);
        assert_eq!(Cnf::default().n_variables(), 0);
    }

    #[test]
    fn test_cnf_to_dimacs() {
        let cnf: Cnf = vec![
            vec![Literal::regular(0), Literal::negated(1)],
            vec![Literal::regular(1)],
        ]
        .into_iter()
        .collect();
        assert_eq!(cnf.to_dimacs(), "p cnf 2 2\n1 -2 0\n2 0\n");
    }

    #[test]
    fn test_satisfiability_from_bool() {
        assert_eq!(Satisfiability::from(true), Satisfiability::Satisfiable);
        assert!(!Satisfiability::from(false).is_sat());
        assert_eq!(Satisfiability::Unsatisfiable.to_string(), "UNSATISFIABLE");
    }
}
