pub mod error;
pub mod relation;
pub mod csp;
pub mod cnf;
pub mod generators;
pub mod polymorphism;
pub mod encoder;
pub mod solver;
pub mod checker;

pub use error::{CspError, Result};
pub use relation::{DomainValue, Relation, Tuple};
pub use csp::{Constraint, ConstraintTag, Csp, Variable};
pub use cnf::{Clause, Cnf, Literal, Polarity, Satisfiability};
pub use generators::{
    all_relevant_relations, all_tuples, relevant_tuples,
    relation_from_predicate, eq_relation, neq_relation,
    eq_constraint, neq_constraint, assignment_constraint,
    MAX_DOMAIN_SIZE,
};
pub use polymorphism::{
    Identity, Operation,
    siggers_operation, olsak_operation, weak_near_unanimity_operation,
    index_to_tuple, tuple_to_index, satisfies_identity, apply_identity,
    has_polymorphism_csp, construct_preserves_operation_csp,
};
pub use encoder::{
    Encoder, Encoding, inverse, nogoods,
    DirectEncoder, MultivaluedDirectEncoder, BinaryEncoder, LogEncoder,
    SupportEncoder, LabelCoverEncoder, MultivaluedLabelCoverEncoder,
};
pub use solver::{
    SatSolverBackend, VarisatSolver, solve, solve_varisat,
    csp_to_minizinc, write_minizinc, minizinc_is_satisfiable,
};
#[cfg(feature = "cadical")]
pub use solver::CaDiCaLSolver;
pub use checker::{classify_all, PolymorphismChecker};
