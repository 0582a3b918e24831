// Error types for relation generation, model construction and solving

use thiserror::Error;

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, CspError>;

/// Errors surfaced to callers.
///
/// A clause-count mismatch inside an encoder is not represented here: it is a
/// programming error and panics.
#[derive(Debug, Error)]
pub enum CspError {
    /// Domain too large for subset enumeration
    #[error("infeasible domain size {domain_size} (at most {max} supported)")]
    InfeasibleDomain { domain_size: usize, max: usize },

    /// Too many candidate tuples to enumerate all of their subsets
    #[error("{tuples} candidate tuples yield too many subsets to enumerate")]
    TooManyTuples { tuples: usize },

    /// A tuple (or variable list) whose length differs from the relation arity
    #[error("arity mismatch: expected {expected}, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    /// The same tuple appears twice in a relation
    #[error("duplicate tuple {0} in relation")]
    DuplicateTuple(String),

    /// A relation was built from no rows, so its arity is unknown
    #[error("cannot infer the arity of an empty relation")]
    EmptyRelation,

    /// An operation signature whose identities do not fit its arity
    #[error("malformed operation: {0}")]
    MalformedOperation(String),

    /// Encoding name not recognised by `Encoding::from_str`
    #[error("unknown encoding '{0}'")]
    UnknownEncoding(String),

    /// SAT backend failed to produce a verdict
    #[error("SAT solver error: {0}")]
    Solver(String),

    /// I/O while exporting or invoking an external solver
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// External solver printed something other than a known verdict
    #[error("unexpected solver output: {0:?}")]
    UnexpectedSolverOutput(String),
}
