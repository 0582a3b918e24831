// Clause builders shared by the one-hot and row-selector encodings

use tracing::debug;

use crate::cnf::{Clause, Cnf, Literal};
use crate::csp::{Constraint, Csp, Variable};
use crate::relation::DomainValue;

/// Boolean for "CSP variable `variable` takes `value`"
pub(crate) fn value_literal(variable: Variable, domain_size: usize, value: DomainValue) -> usize {
    variable * domain_size + value
}

/// First row-selector boolean of each constraint. Selectors follow the one-hot
/// block, one per relation row, in constraint order.
pub(crate) fn row_selector_offsets(csp: &Csp) -> Vec<usize> {
    let mut next = csp.n_variables() * csp.domain_size();
    csp.constraints()
        .iter()
        .map(|c| {
            let offset = next;
            next += c.relation_size();
            offset
        })
        .collect()
}

/// Accumulates clauses up to a precomputed count
pub(crate) struct ClauseBuilder {
    encoder: &'static str,
    expected: usize,
    clauses: Vec<Clause>,
}

impl ClauseBuilder {
    pub(crate) fn new(encoder: &'static str, expected: usize) -> Self {
        ClauseBuilder {
            encoder,
            expected,
            clauses: Vec::with_capacity(expected),
        }
    }

    pub(crate) fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    /// Pairwise exclusion over `literals`
    pub(crate) fn at_most_one(&mut self, literals: impl Iterator<Item = usize> + Clone) {
        for (i, a) in literals.clone().enumerate() {
            for b in literals.clone().skip(i + 1) {
                self.push(vec![Literal::negated(a), Literal::negated(b)]);
            }
        }
    }

    pub(crate) fn at_least_one(&mut self, literals: impl Iterator<Item = usize>) {
        self.push(literals.map(Literal::regular).collect());
    }

    /// `variable` takes at most one value
    pub(crate) fn value_at_most_one(&mut self, variable: Variable, domain_size: usize) {
        self.at_most_one((0..domain_size).map(|d| value_literal(variable, domain_size, d)));
    }

    /// `variable` takes at least one value
    pub(crate) fn value_at_least_one(&mut self, variable: Variable, domain_size: usize) {
        self.at_least_one((0..domain_size).map(|d| value_literal(variable, domain_size, d)));
    }

    /// One clause per nogood row: its variables do not all take the row's values
    pub(crate) fn conflicts(&mut self, nogood: &Constraint, domain_size: usize) {
        for row in nogood.relation() {
            self.push(
                nogood
                    .variables()
                    .iter()
                    .zip(row.iter())
                    .map(|(&v, &value)| Literal::negated(value_literal(v, domain_size, value)))
                    .collect(),
            );
        }
    }

    pub(crate) fn row_at_most_one(&mut self, offset: usize, rows: usize) {
        self.at_most_one(offset..offset + rows);
    }

    pub(crate) fn row_at_least_one(&mut self, offset: usize, rows: usize) {
        self.at_least_one(offset..offset + rows);
    }

    /// A selected row assigns each of the constraint's variables its value
    pub(crate) fn row_implications(&mut self, constraint: &Constraint, offset: usize, domain_size: usize) {
        for (j, row) in constraint.relation().iter().enumerate() {
            for (&v, &value) in constraint.variables().iter().zip(row.iter()) {
                self.push(vec![
                    Literal::negated(offset + j),
                    Literal::regular(value_literal(v, domain_size, value)),
                ]);
            }
        }
    }

    /// A value taken at some position is backed by a selected row carrying it
    pub(crate) fn row_supports(&mut self, constraint: &Constraint, offset: usize, domain_size: usize) {
        let relation = constraint.relation();
        for (k, &v) in constraint.variables().iter().enumerate() {
            for value in 0..domain_size {
                let mut clause = vec![Literal::negated(value_literal(v, domain_size, value))];
                clause.extend(
                    relation
                        .iter()
                        .enumerate()
                        .filter(|(_, row)| row[k] == value)
                        .map(|(j, _)| Literal::regular(offset + j)),
                );
                self.push(clause);
            }
        }
    }

    /// Check the emitted count against the precomputed one and hand over the CNF
    pub(crate) fn finish(self) -> Cnf {
        assert_eq!(
            self.clauses.len(),
            self.expected,
            "{} encoding emitted a different number of clauses than predicted",
            self.encoder
        );
        debug!(encoder = self.encoder, clauses = self.clauses.len(), "encoded CSP");
        Cnf::new(self.clauses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relation::Relation;

    #[test]
    fn test_row_selector_offsets() {
        let r2 = Relation::from_rows([[1, 0], [0, 1]]).unwrap();
        let r3 = Relation::from_rows([[1, 0], [0, 1], [2, 2]]).unwrap();
        let csp = Csp::new(vec![
            Constraint::new(r3, vec![0, 1]).unwrap(),
            Constraint::new(r2, vec![1, 2]).unwrap(),
        ]);
        // n = 3, d = 3: selectors start at 9
        assert_eq!(row_selector_offsets(&csp), vec![9, 12]);
    }

    #[test]
    fn test_value_clauses() {
        let mut builder = ClauseBuilder::new("test", 4);
        builder.value_at_most_one(1, 3);
        builder.value_at_least_one(1, 3);
        let cnf = builder.finish();
        assert_eq!(
            cnf.clauses()[0],
            vec![Literal::negated(3), Literal::negated(4)]
        );
        assert_eq!(
            cnf.clauses()[2],
            vec![Literal::negated(4), Literal::negated(5)]
        );
        assert_eq!(
            cnf.clauses()[3],
            vec![Literal::regular(3), Literal::regular(4), Literal::regular(5)]
        );
    }

    #[test]
    fn test_row_supports() {
        let r = Relation::from_rows([[1, 0], [0, 1], [1, 1]]).unwrap();
        let c = Constraint::new(r, vec![0, 1]).unwrap();
        let mut builder = ClauseBuilder::new("test", 4);
        builder.row_supports(&c, 10, 2);
        let cnf = builder.finish();
        // x0 = 0 needs row 1; x0 = 1 needs row 0 or row 2
        assert_eq!(cnf.clauses()[0], vec![Literal::negated(0), Literal::regular(11)]);
        assert_eq!(
            cnf.clauses()[1],
            vec![Literal::negated(1), Literal::regular(10), Literal::regular(12)]
        );
    }

    #[test]
    #[should_panic(expected = "different number of clauses")]
    fn test_finish_checks_count() {
        let mut builder = ClauseBuilder::new("test", 2);
        builder.at_least_one(0..2);
        builder.finish();
    }
}
