// Checker: relation -> meta-CSP -> CNF -> verdict, one pipeline per relation

use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::cnf::Satisfiability;
use crate::csp::Csp;
use crate::encoder::Encoder;
use crate::error::Result;
use crate::polymorphism::{construct_preserves_operation_csp, has_polymorphism_csp, Operation};
use crate::relation::Relation;
use crate::solver::{self, minizinc_is_satisfiable, SatSolverBackend, VarisatSolver};

/// Decides whether relations admit a polymorphism of a fixed signature
pub struct PolymorphismChecker<E: Encoder> {
    operation: Operation,
    encoder: E,
}

impl<E: Encoder> PolymorphismChecker<E> {
    pub fn new(operation: Operation, encoder: E) -> Self {
        PolymorphismChecker { operation, encoder }
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Whether every constraint of `csp` is preserved by one common operation
    pub fn check_csp_with<B>(&self, csp: &Csp, backend: &mut B) -> Result<Satisfiability>
    where
        B: SatSolverBackend + ?Sized,
    {
        let meta = has_polymorphism_csp(csp, &self.operation);
        let cnf = self.encoder.encode(&meta);
        debug!(
            encoder = self.encoder.name(),
            variables = cnf.n_variables(),
            clauses = cnf.len(),
            "checking polymorphism"
        );
        solver::solve(&cnf, backend)
    }

    pub fn check_with<B>(&self, relation: &Relation, backend: &mut B) -> Result<Satisfiability>
    where
        B: SatSolverBackend + ?Sized,
    {
        let meta = construct_preserves_operation_csp(&self.operation, relation);
        let cnf = self.encoder.encode(&meta);
        solver::solve(&cnf, backend)
    }

    /// `check_with` on a fresh varisat instance
    pub fn check(&self, relation: &Relation) -> Result<Satisfiability> {
        self.check_with(relation, &mut VarisatSolver::new())
    }

    /// Decide the meta-CSP with MiniZinc instead of a SAT backend. The model is
    /// written to `path`.
    pub fn check_minizinc(&self, relation: &Relation, path: &Path) -> Result<Satisfiability> {
        let meta = construct_preserves_operation_csp(&self.operation, relation);
        minizinc_is_satisfiable(&meta, path)
    }
}

/// Check every relation on the rayon pool; results keep the input order
pub fn classify_all<E>(
    checker: &PolymorphismChecker<E>,
    relations: &[Relation],
) -> Result<Vec<Satisfiability>>
where
    E: Encoder + Sync,
{
    info!(
        relations = relations.len(),
        encoder = checker.encoder().name(),
        "classifying relations"
    );
    relations
        .par_iter()
        .map(|relation| checker.check(relation))
        .collect()
}
