// Nogoods: complement of a constraint's relation over the full tuple space

use std::sync::Arc;

use crate::csp::{Constraint, ConstraintTag};
use crate::generators::{all_tuples, n_tuples};
use crate::relation::Relation;

/// Constraint over the same variables whose rows are exactly the tuples of
/// `domain_size^arity` not allowed by `constraint`, in ascending order.
/// Rows of the relation with values outside the domain are ignored.
pub fn inverse(constraint: &Constraint, domain_size: usize) -> Constraint {
    let mut universe = all_tuples(constraint.arity(), domain_size);
    universe.sort();
    let allowed = constraint.relation().sorted();
    let allowed = allowed.tuples();

    let mut forbidden = Vec::with_capacity(universe.len().saturating_sub(allowed.len()));
    let mut j = 0;
    for tuple in universe {
        while j < allowed.len() && allowed[j] < tuple {
            j += 1;
        }
        if j < allowed.len() && allowed[j] == tuple {
            j += 1;
            continue;
        }
        forbidden.push(tuple);
    }

    Constraint::from_parts(
        Arc::new(Relation::from_tuples_unchecked(constraint.arity(), forbidden)),
        constraint.variables().to_vec(),
        ConstraintTag::Other,
    )
}

/// `inverse` of every constraint, in order
pub fn nogoods(constraints: &[Constraint], domain_size: usize) -> Vec<Constraint> {
    constraints
        .iter()
        .map(|c| inverse(c, domain_size))
        .collect()
}

/// Number of rows `inverse(constraint, domain_size)` has, for relations whose
/// values all lie below `domain_size`
pub(crate) fn nogood_count(constraint: &Constraint, domain_size: usize) -> usize {
    n_tuples(constraint.arity(), domain_size).saturating_sub(constraint.relation_size())
}
