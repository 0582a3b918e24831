// CaDiCaL Solver using cadical-sys

use cadical_sys::{CaDiCal, Status};
use tracing::warn;

use super::SatSolverBackend;
use crate::error::{CspError, Result};

/// CaDiCaL-based SAT backend
pub struct CaDiCaLSolver {
    solver: CaDiCal,
}

impl CaDiCaLSolver {
    pub fn new() -> Self {
        CaDiCaLSolver {
            solver: CaDiCal::new(),
        }
    }
}

impl Default for CaDiCaLSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SatSolverBackend for CaDiCaLSolver {
    fn add_clause(&mut self, clause: &[i32]) {
        for &lit in clause {
            self.solver.add(lit);
        }
        self.solver.add(0); // terminate clause
    }

    fn reserve_vars(&mut self, count: i32) {
        self.solver.reserve(count);
    }

    fn solve(&mut self) -> Result<bool> {
        match self.solver.solve() {
            Status::SATISFIABLE => Ok(true),
            Status::UNSATISFIABLE => Ok(false),
            Status::UNKNOWN => {
                warn!("CaDiCaL returned UNKNOWN");
                Err(CspError::Solver("CaDiCaL returned UNKNOWN".to_string()))
            }
        }
    }
}
