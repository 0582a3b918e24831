// Polymorphism meta-CSP: operation signatures and the CSP whose solutions are
// function tables of operations preserving a relation
//
// Table entries are addressed big-endian: the last argument is the least
// significant digit. Do not confuse with the enumeration order of
// `generators::all_tuples`.

use std::sync::Arc;

use tracing::debug;

use crate::csp::{Constraint, ConstraintTag, Csp, Variable};
use crate::error::{CspError, Result};
use crate::generators::{eq_relation, increment_in_domain, n_tuples};
use crate::relation::{DomainValue, Relation, Tuple};

/// Equational law: the operation takes equal values on inputs matching any two
/// of its patterns. Positions sharing a label must receive equal arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    patterns: Vec<Vec<usize>>,
}

impl Identity {
    pub fn new(patterns: Vec<Vec<usize>>) -> Self {
        Identity { patterns }
    }

    pub fn patterns(&self) -> &[Vec<usize>] {
        &self.patterns
    }
}

/// Operation signature: arity plus the identities the operation must satisfy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    arity: usize,
    identities: Vec<Identity>,
}

impl Operation {
    pub fn new(arity: usize, identities: Vec<Identity>) -> Result<Self> {
        for identity in &identities {
            if identity.patterns.len() < 2 {
                return Err(CspError::MalformedOperation(format!(
                    "identity needs at least two patterns, got {}",
                    identity.patterns.len()
                )));
            }
            if let Some(p) = identity.patterns.iter().find(|p| p.len() != arity) {
                return Err(CspError::MalformedOperation(format!(
                    "pattern {:?} does not have length {}",
                    p, arity
                )));
            }
        }
        Ok(Operation { arity, identities })
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }

    /// Number of function-table entries over a domain
    pub fn table_size(&self, domain_size: usize) -> usize {
        n_tuples(self.arity, domain_size)
    }
}

/// Siggers: s(a,r,e,a) = s(r,a,r,e)
pub fn siggers_operation() -> Operation {
    Operation {
        arity: 4,
        identities: vec![Identity::new(vec![vec![0, 1, 0, 2], vec![1, 0, 2, 1]])],
    }
}

/// Olšák: o(x,y,y,y,x,x) = o(y,x,y,x,y,x) = o(y,y,x,x,x,y)
pub fn olsak_operation() -> Operation {
    Operation {
        arity: 6,
        identities: vec![Identity::new(vec![
            vec![0, 1, 1, 1, 0, 0],
            vec![1, 0, 1, 0, 1, 0],
            vec![1, 1, 0, 0, 0, 1],
        ])],
    }
}

/// Weak near-unanimity w(y,x,..,x) = w(x,y,..,x) = .. = w(x,..,x,y).
/// Idempotence is not expressible as a table identity and is not imposed.
pub fn weak_near_unanimity_operation(arity: usize) -> Result<Operation> {
    if arity < 2 {
        return Err(CspError::MalformedOperation(format!(
            "weak near-unanimity needs arity >= 2, got {}",
            arity
        )));
    }
    let patterns = (0..arity)
        .map(|i| (0..arity).map(|j| usize::from(i == j)).collect())
        .collect();
    Operation::new(arity, vec![Identity::new(patterns)])
}

/// Decode a table index into its argument tuple (big-endian)
pub fn index_to_tuple(mut index: usize, arity: usize, domain_size: usize) -> Tuple {
    let mut result = vec![0; arity];
    for i in 0..arity {
        let remainder = index % domain_size;
        result[arity - 1 - i] = remainder;
        index /= domain_size;
    }
    Tuple::new(result)
}

/// Encode an argument tuple as a table index (big-endian)
pub fn tuple_to_index(input: &[DomainValue], domain_size: usize) -> usize {
    input.iter().fold(0, |acc, &v| acc * domain_size + v)
}

/// Whether equal-labelled positions of `pattern` carry equal values in `input`
pub fn satisfies_identity(input: &[DomainValue], pattern: &[usize]) -> bool {
    for i in 0..input.len() {
        for j in i + 1..input.len() {
            if pattern[i] == pattern[j] && input[i] != input[j] {
                return false;
            }
        }
    }
    true
}

/// Mirror `input` from pattern `from` onto pattern `to`: every position of `to`
/// takes the value carried by the same label in `from`. Positions whose label
/// does not occur in `from` keep their value.
pub fn apply_identity(input: &[DomainValue], from: &[usize], to: &[usize]) -> Tuple {
    let mut result = input.to_vec();
    for (i, label) in from.iter().enumerate() {
        for (j, other) in to.iter().enumerate() {
            if label == other {
                result[j] = input[i];
            }
        }
    }
    Tuple::new(result)
}

fn identity_constraints(operation: &Operation, domain_size: usize, result: &mut Vec<Constraint>) {
    let table_size = operation.table_size(domain_size);
    let eq = Arc::new(eq_relation(2, domain_size));
    for identity in &operation.identities {
        let patterns = identity.patterns();
        for i in 0..patterns.len() {
            for j in i + 1..patterns.len() {
                for k in 0..table_size {
                    let input = index_to_tuple(k, operation.arity, domain_size);
                    if !satisfies_identity(&input, &patterns[i]) {
                        continue;
                    }
                    let mirror = apply_identity(&input, &patterns[i], &patterns[j]);
                    let k_mirror = tuple_to_index(&mirror, domain_size);
                    result.push(Constraint::from_parts(
                        Arc::clone(&eq),
                        vec![k, k_mirror],
                        ConstraintTag::Eq,
                    ));
                }
            }
        }
    }
}

/// For every choice of one row per operation argument, the table entries at
/// the columns of the chosen rows must form a row of the relation.
fn polymorphism_constraints(
    constraint: &Constraint,
    domain_size: usize,
    operation_arity: usize,
    result: &mut Vec<Constraint>,
) {
    let relation = constraint.relation();
    let n_rows = relation.len();
    let n_iterations = n_tuples(operation_arity, n_rows);

    let mut rows = vec![0; operation_arity];
    let mut input = vec![0; operation_arity];
    for _ in 0..n_iterations {
        let indices: Vec<Variable> = (0..relation.arity())
            .map(|column| {
                for (slot, &row) in rows.iter().enumerate() {
                    input[slot] = relation[row][column];
                }
                tuple_to_index(&input, domain_size)
            })
            .collect();
        result.push(Constraint::from_parts(
            Arc::clone(constraint.shared_relation()),
            indices,
            ConstraintTag::Other,
        ));
        increment_in_domain(&mut rows, n_rows);
    }
}

/// Meta-CSP whose solutions are tables of `operation` preserving every
/// constraint of `input`
pub fn has_polymorphism_csp(input: &Csp, operation: &Operation) -> Csp {
    let domain_size = input.domain_size();
    let mut constraints = Vec::new();

    identity_constraints(operation, domain_size, &mut constraints);
    let n_identity = constraints.len();

    for constraint in input.constraints() {
        polymorphism_constraints(constraint, domain_size, operation.arity, &mut constraints);
    }

    let csp = Csp::new(constraints);
    debug!(
        domain_size,
        identity_constraints = n_identity,
        polymorphism_constraints = csp.num_constraints() - n_identity,
        variables = csp.n_variables(),
        "built polymorphism CSP"
    );
    csp
}

/// Meta-CSP for a single relation applied to its natural variables
pub fn construct_preserves_operation_csp(operation: &Operation, relation: &Relation) -> Csp {
    let variables = (0..relation.arity()).collect();
    let input = Csp::new(vec![Constraint::from_parts(
        Arc::new(relation.clone()),
        variables,
        ConstraintTag::Other,
    )]);
    has_polymorphism_csp(&input, operation)
}
