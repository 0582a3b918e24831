// Solver module: SAT backends and the MiniZinc exporter

pub mod varisat_solver;
#[cfg(feature = "cadical")]
pub mod cadical;
pub mod minizinc;

use tracing::debug;

use crate::cnf::{Cnf, Satisfiability};
use crate::error::{CspError, Result};

pub use varisat_solver::VarisatSolver;
#[cfg(feature = "cadical")]
pub use cadical::CaDiCaLSolver;
pub use minizinc::{csp_to_minizinc, minizinc_is_satisfiable, write_minizinc};

/// SAT solver backend trait
/// Provides low-level access to SAT solver operations in DIMACS numbering
pub trait SatSolverBackend {
    /// Add a clause of signed 1-based literals
    fn add_clause(&mut self, clause: &[i32]);

    /// Announce that variables `1..=count` will be used
    fn reserve_vars(&mut self, count: i32);

    /// Solve and return true if satisfiable
    fn solve(&mut self) -> Result<bool>;
}

/// Load `cnf` into `backend` and decide it
pub fn solve<B: SatSolverBackend + ?Sized>(cnf: &Cnf, backend: &mut B) -> Result<Satisfiability> {
    let n_variables = i32::try_from(cnf.n_variables()).map_err(|_| {
        CspError::Solver(format!(
            "{} variables exceed the DIMACS range",
            cnf.n_variables()
        ))
    })?;
    backend.reserve_vars(n_variables);

    let mut buffer = Vec::new();
    for clause in cnf.clauses() {
        buffer.clear();
        buffer.extend(clause.iter().map(|lit| lit.to_dimacs()));
        backend.add_clause(&buffer);
    }

    let result = Satisfiability::from(backend.solve()?);
    debug!(variables = n_variables, clauses = cnf.len(), %result, "solved CNF");
    Ok(result)
}

/// Decide `cnf` with a fresh varisat instance
pub fn solve_varisat(cnf: &Cnf) -> Result<Satisfiability> {
    solve(cnf, &mut VarisatSolver::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::Literal;

    /// Backend recording what it receives
    #[derive(Default)]
    struct RecordingBackend {
        reserved: i32,
        clauses: Vec<Vec<i32>>,
    }

    impl SatSolverBackend for RecordingBackend {
        fn add_clause(&mut self, clause: &[i32]) {
            self.clauses.push(clause.to_vec());
        }

        fn reserve_vars(&mut self, count: i32) {
            self.reserved = count;
        }

        fn solve(&mut self) -> Result<bool> {
            Ok(true)
        }
    }

    #[test]
    fn test_solve_uses_dimacs_numbering() {
        let cnf = Cnf::new(vec![
            vec![Literal::regular(0), Literal::negated(2)],
            vec![Literal::negated(1)],
        ]);
        let mut backend = RecordingBackend::default();
        let result = solve(&cnf, &mut backend).unwrap();
        assert_eq!(result, Satisfiability::Satisfiable);
        assert_eq!(backend.reserved, 3);
        assert_eq!(backend.clauses, vec![vec![1, -3], vec![-2]]);
    }

    #[test]
    fn test_solve_varisat_simple() {
        // x0, x0 -> x1, not x1
        let sat = Cnf::new(vec![
            vec![Literal::regular(0)],
            vec![Literal::negated(0), Literal::regular(1)],
        ]);
        assert_eq!(solve_varisat(&sat).unwrap(), Satisfiability::Satisfiable);

        let mut clauses = sat.clauses().to_vec();
        clauses.push(vec![Literal::negated(1)]);
        assert_eq!(
            solve_varisat(&Cnf::new(clauses)).unwrap(),
            Satisfiability::Unsatisfiable
        );
    }

    #[test]
    fn test_solve_varisat_small_formulas() {
        let r = Literal::regular;
        let n = Literal::negated;
        let cases = vec![
            (vec![vec![r(0)]], true),
            (vec![vec![r(0), r(1)]], true),
            (vec![vec![r(1)], vec![n(1)]], false),
            (vec![vec![n(0), r(1)], vec![n(1), r(2)], vec![n(2), r(0)]], true),
            (vec![vec![r(0), r(1)], vec![n(1), r(0)], vec![n(0)]], false),
        ];
        for (clauses, expected) in cases {
            let cnf = Cnf::new(clauses);
            assert_eq!(solve_varisat(&cnf).unwrap().is_sat(), expected, "{:?}", cnf);
        }
    }

    #[test]
    fn test_solve_varisat_empty() {
        assert!(solve_varisat(&Cnf::default()).unwrap().is_sat());
        let empty_clause = Cnf::new(vec![vec![]]);
        assert!(!solve_varisat(&empty_clause).unwrap().is_sat());
    }
}
