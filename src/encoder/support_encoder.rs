// Support encoding: one-hot variables plus one selector per relation row

use super::clauses::{row_selector_offsets, ClauseBuilder};
use super::traits::{n_choose_k, Encoder};
use crate::cnf::Cnf;
use crate::csp::{Constraint, Csp};

/// Encodes allowed rows instead of forbidden ones. Each constraint selects
/// exactly one of its rows and the selected row fixes the variable values.
#[derive(Debug, Clone, Copy, Default)]
pub struct SupportEncoder;

/// Selector clauses of one constraint: row AMO, row ALO and implications
pub(crate) fn selector_clause_count(constraint: &Constraint) -> usize {
    let rows = constraint.relation_size();
    n_choose_k(rows, 2) + 1 + rows * constraint.arity()
}

/// Clause count shared by the support and label-cover layouts
pub(crate) fn support_clause_count(csp: &Csp) -> usize {
    let n = csp.n_variables();
    n * n_choose_k(csp.domain_size(), 2)
        + n
        + csp
            .constraints()
            .iter()
            .map(selector_clause_count)
            .sum::<usize>()
}

impl Encoder for SupportEncoder {
    fn name(&self) -> &'static str {
        "support"
    }

    fn clause_count(&self, csp: &Csp) -> usize {
        support_clause_count(csp)
    }

    fn encode(&self, csp: &Csp) -> Cnf {
        let n = csp.n_variables();
        let d = csp.domain_size();
        let offsets = row_selector_offsets(csp);
        let mut builder = ClauseBuilder::new(self.name(), self.clause_count(csp));

        for v in 0..n {
            builder.value_at_most_one(v, d);
        }
        for v in 0..n {
            builder.value_at_least_one(v, d);
        }
        for (c, &offset) in csp.constraints().iter().zip(&offsets) {
            builder.row_at_most_one(offset, c.relation_size());
        }
        for (c, &offset) in csp.constraints().iter().zip(&offsets) {
            builder.row_at_least_one(offset, c.relation_size());
        }
        for (c, &offset) in csp.constraints().iter().zip(&offsets) {
            builder.row_implications(c, offset, d);
        }
        builder.finish()
    }
}
