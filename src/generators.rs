// Generators: tuple enumeration, relation families and constraint factories
//
// Enumeration order is mixed-radix with position 0 varying fastest. This is
// unrelated to the big-endian function-table addressing in `polymorphism`.

use std::sync::Arc;

use tracing::{debug, error};

use crate::csp::{Constraint, ConstraintTag, Variable};
use crate::error::{CspError, Result};
use crate::relation::{DomainValue, Relation, Tuple};

/// Largest domain accepted by `all_relevant_relations`
pub const MAX_DOMAIN_SIZE: usize = 64;

/// Advance `tuple` to its successor, position 0 fastest
pub(crate) fn increment_in_domain(tuple: &mut [DomainValue], domain_size: usize) {
    for val in tuple.iter_mut() {
        *val += 1;
        if *val < domain_size {
            return;
        }
        *val = 0;
    }
}

pub(crate) fn n_tuples(arity: usize, domain_size: usize) -> usize {
    domain_size.pow(arity as u32)
}

/// All `domain_size^arity` tuples, position 0 fastest-varying
pub fn all_tuples(arity: usize, domain_size: usize) -> Vec<Tuple> {
    let n = n_tuples(arity, domain_size);
    let mut result = Vec::with_capacity(n);
    let mut current = vec![0; arity];
    for _ in 0..n {
        result.push(Tuple::from(current.as_slice()));
        increment_in_domain(&mut current, domain_size);
    }
    result
}

/// Non-constant tuples of `all_tuples(n, domain_size)`, in enumeration order
pub fn relevant_tuples(n: usize, domain_size: usize) -> Vec<Tuple> {
    all_tuples(n, domain_size)
        .into_iter()
        .filter(|t| !t.is_constant())
        .collect()
}

/// One relation per non-empty subset of the non-constant `n`-ary tuples,
/// sorted by size (stable, so equal sizes keep subset-counter order).
pub fn all_relevant_relations(n: usize, domain_size: usize) -> Result<Vec<Relation>> {
    if domain_size > MAX_DOMAIN_SIZE {
        error!(domain_size, "infeasible domain size");
        return Err(CspError::InfeasibleDomain {
            domain_size,
            max: MAX_DOMAIN_SIZE,
        });
    }

    let tuples = relevant_tuples(n, domain_size);
    if tuples.len() >= usize::BITS as usize {
        return Err(CspError::TooManyTuples { tuples: tuples.len() });
    }

    let n_subsets = 1usize << tuples.len();
    let mut result: Vec<Relation> = (1..n_subsets)
        .map(|mask| {
            let subset = tuples
                .iter()
                .enumerate()
                .filter(|(i, _)| mask >> i & 1 == 1)
                .map(|(_, t)| t.clone())
                .collect();
            Relation::from_tuples_unchecked(n, subset)
        })
        .collect();
    result.sort_by_key(Relation::len);

    debug!(n, domain_size, relations = result.len(), "generated relevant relations");
    Ok(result)
}

/// Relation of all tuples accepted by `predicate`
pub fn relation_from_predicate<F>(arity: usize, domain_size: usize, predicate: F) -> Relation
where
    F: Fn(&Tuple) -> bool,
{
    let tuples = all_tuples(arity, domain_size)
        .into_iter()
        .filter(|t| predicate(t))
        .collect();
    Relation::from_tuples_unchecked(arity, tuples)
}

/// Tuples with some two adjacent coordinates equal
pub fn eq_relation(arity: usize, domain_size: usize) -> Relation {
    relation_from_predicate(arity, domain_size, |t| t.windows(2).any(|w| w[0] == w[1]))
}

/// Tuples with some two adjacent coordinates different
pub fn neq_relation(arity: usize, domain_size: usize) -> Relation {
    relation_from_predicate(arity, domain_size, |t| t.windows(2).any(|w| w[0] != w[1]))
}

pub fn eq_constraint(variables: Vec<Variable>, domain_size: usize) -> Constraint {
    let relation = Arc::new(eq_relation(variables.len(), domain_size));
    Constraint::from_parts(relation, variables, ConstraintTag::Eq)
}

pub fn neq_constraint(variables: Vec<Variable>, domain_size: usize) -> Constraint {
    let relation = Arc::new(neq_relation(variables.len(), domain_size));
    Constraint::from_parts(relation, variables, ConstraintTag::Ne)
}

/// Fix `variables` to the values of `row`
pub fn assignment_constraint(variables: Vec<Variable>, row: Tuple) -> Result<Constraint> {
    let relation = Relation::new(row.arity(), vec![row])?;
    Constraint::with_tag(relation, variables, ConstraintTag::Is)
}
