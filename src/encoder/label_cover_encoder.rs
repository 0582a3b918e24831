// Label-cover encodings: support-style clauses laid out per variable, then per constraint

use super::clauses::{row_selector_offsets, ClauseBuilder};
use super::support_encoder::{selector_clause_count, support_clause_count};
use super::traits::Encoder;
use crate::cnf::Cnf;
use crate::csp::Csp;

/// Same clauses as the support encoding, grouped by the variable or
/// constraint they belong to.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelCoverEncoder;

/// Label cover without value at-most-one clauses. Every position of a
/// constraint gets one support clause per value: a value held by the
/// position's variable must be carried by the selected row. Together with
/// the exactly-one row selection this keeps each constrained variable
/// single-valued.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultivaluedLabelCoverEncoder;

impl Encoder for LabelCoverEncoder {
    fn name(&self) -> &'static str {
        "label-cover"
    }

    fn clause_count(&self, csp: &Csp) -> usize {
        support_clause_count(csp)
    }

    fn encode(&self, csp: &Csp) -> Cnf {
        let d = csp.domain_size();
        let offsets = row_selector_offsets(csp);
        let mut builder = ClauseBuilder::new(self.name(), self.clause_count(csp));

        for v in 0..csp.n_variables() {
            builder.value_at_most_one(v, d);
            builder.value_at_least_one(v, d);
        }
        for (c, &offset) in csp.constraints().iter().zip(&offsets) {
            builder.row_at_most_one(offset, c.relation_size());
            builder.row_at_least_one(offset, c.relation_size());
            builder.row_implications(c, offset, d);
        }
        builder.finish()
    }
}

impl Encoder for MultivaluedLabelCoverEncoder {
    fn name(&self) -> &'static str {
        "multivalued-label-cover"
    }

    fn clause_count(&self, csp: &Csp) -> usize {
        let d = csp.domain_size();
        csp.n_variables()
            + csp
                .constraints()
                .iter()
                .map(|c| selector_clause_count(c) + c.arity() * d)
                .sum::<usize>()
    }

    fn encode(&self, csp: &Csp) -> Cnf {
        let d = csp.domain_size();
        let offsets = row_selector_offsets(csp);
        let mut builder = ClauseBuilder::new(self.name(), self.clause_count(csp));

        for v in 0..csp.n_variables() {
            builder.value_at_least_one(v, d);
        }
        for (c, &offset) in csp.constraints().iter().zip(&offsets) {
            builder.row_at_most_one(offset, c.relation_size());
            builder.row_at_least_one(offset, c.relation_size());
            builder.row_implications(c, offset, d);
            builder.row_supports(c, offset, d);
        }
        builder.finish()
    }
}
