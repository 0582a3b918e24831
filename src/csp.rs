// CSP (Constraint Satisfaction Problem) container

use std::sync::Arc;

use crate::error::{CspError, Result};
use crate::relation::{DomainValue, Relation};

/// A CSP unknown, identified by its index
pub type Variable = usize;

/// Rendering hint for external constraint solvers; no effect on SAT encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConstraintTag {
    Eq,
    Ne,
    Is,
    #[default]
    Other,
}

/// A relation applied to an ordered list of variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    relation: Arc<Relation>,
    variables: Vec<Variable>,
    tag: ConstraintTag,
}

impl Constraint {
    pub fn new(relation: impl Into<Arc<Relation>>, variables: Vec<Variable>) -> Result<Self> {
        Self::with_tag(relation, variables, ConstraintTag::Other)
    }

    pub fn with_tag(
        relation: impl Into<Arc<Relation>>,
        variables: Vec<Variable>,
        tag: ConstraintTag,
    ) -> Result<Self> {
        let relation = relation.into();
        if relation.arity() != variables.len() {
            return Err(CspError::ArityMismatch {
                expected: relation.arity(),
                actual: variables.len(),
            });
        }
        Ok(Constraint { relation, variables, tag })
    }

    /// Variables count already known to match the relation arity
    pub(crate) fn from_parts(
        relation: Arc<Relation>,
        variables: Vec<Variable>,
        tag: ConstraintTag,
    ) -> Self {
        debug_assert_eq!(relation.arity(), variables.len());
        Constraint { relation, variables, tag }
    }

    pub fn relation(&self) -> &Relation {
        &self.relation
    }

    pub(crate) fn shared_relation(&self) -> &Arc<Relation> {
        &self.relation
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn tag(&self) -> ConstraintTag {
        self.tag
    }

    pub fn arity(&self) -> usize {
        self.relation.arity()
    }

    pub fn relation_size(&self) -> usize {
        self.relation.len()
    }
}

/// CSP: ordered list of constraints.
///
/// `n_variables` and `domain_size` are derived from the constraints: one past
/// the largest variable index and one past the largest relation value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Csp {
    constraints: Vec<Constraint>,
    n_variables: usize,
    domain_size: usize,
}

impl Csp {
    pub fn new(constraints: Vec<Constraint>) -> Self {
        let n_variables = constraints
            .iter()
            .flat_map(|c| c.variables().iter().copied())
            .max()
            .map_or(0, |v| v + 1);
        let domain_size = constraints
            .iter()
            .filter_map(|c| c.relation().max_value())
            .max()
            .map_or(0, |d: DomainValue| d + 1);
        Csp {
            constraints,
            n_variables,
            domain_size,
        }
    }

    pub fn n_variables(&self) -> usize {
        self.n_variables
    }

    pub fn domain_size(&self) -> usize {
        self.domain_size
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

impl FromIterator<Constraint> for Csp {
    fn from_iter<I: IntoIterator<Item = Constraint>>(iter: I) -> Self {
        Csp::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csp_new_empty() {
        let csp = Csp::new(vec![]);
        assert_eq!(csp.n_variables(), 0);
        assert_eq!(csp.domain_size(), 0);
        assert!(csp.is_empty());
    }

    #[test]
    fn test_csp_derives_sizes() {
        let r = Relation::from_rows([[1, 0], [0, 2]]).unwrap();
        let csp = Csp::new(vec![
            Constraint::new(r.clone(), vec![0, 4]).unwrap(),
            Constraint::new(r, vec![2, 1]).unwrap(),
        ]);
        assert_eq!(csp.n_variables(), 5);
        assert_eq!(csp.domain_size(), 3);
        assert_eq!(csp.num_constraints(), 2);
    }

    #[test]
    fn test_constraint_rejects_wrong_variable_count() {
        let r = Relation::from_rows([[1, 0]]).unwrap();
        let err = Constraint::new(r, vec![0, 1, 2]);
        assert!(matches!(
            err,
            Err(CspError::ArityMismatch { expected: 2, actual: 3 })
        ));
    }

    #[test]
    fn test_constraint_shares_relation() {
        let r = Arc::new(Relation::from_rows([[0, 1]]).unwrap());
        let a = Constraint::with_tag(Arc::clone(&r), vec![0, 1], ConstraintTag::Ne).unwrap();
        let b = Constraint::new(Arc::clone(&r), vec![1, 2]).unwrap();
        assert!(Arc::ptr_eq(a.shared_relation(), b.shared_relation()));
        assert_eq!(a.tag(), ConstraintTag::Ne);
        assert_eq!(b.tag(), ConstraintTag::Other);
        assert_eq!(a.relation_size(), 1);
    }
}
