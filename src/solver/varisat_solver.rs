// Varisat Solver: pure-Rust CDCL backend

use varisat::{ExtendFormula, Lit, Solver};

use super::SatSolverBackend;
use crate::error::{CspError, Result};

/// Varisat-based SAT backend
pub struct VarisatSolver {
    solver: Solver<'static>,
    clause: Vec<Lit>,
}

impl VarisatSolver {
    pub fn new() -> Self {
        VarisatSolver {
            solver: Solver::new(),
            clause: Vec::new(),
        }
    }
}

impl Default for VarisatSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SatSolverBackend for VarisatSolver {
    fn add_clause(&mut self, clause: &[i32]) {
        self.clause.clear();
        self.clause
            .extend(clause.iter().map(|&lit| Lit::from_dimacs(lit as isize)));
        self.solver.add_clause(&self.clause);
    }

    fn reserve_vars(&mut self, _count: i32) {
        // Varisat grows its variable set as clauses mention new variables
    }

    fn solve(&mut self) -> Result<bool> {
        self.solver
            .solve()
            .map_err(|e| CspError::Solver(format!("{:?}", e)))
    }
}
