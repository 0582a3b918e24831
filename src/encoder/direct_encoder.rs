// Direct encodings: one boolean per (variable, value), one conflict clause per nogood

use super::clauses::ClauseBuilder;
use super::nogoods::{nogood_count, nogoods};
use super::traits::{n_choose_k, Encoder};
use crate::cnf::Cnf;
use crate::csp::Csp;

/// Direct encoding: exactly-one per variable plus conflict clauses
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectEncoder;

/// Direct encoding without the at-most-one clauses. A variable may hold
/// several values at once; any single one of them yields a solution.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultivaluedDirectEncoder;

fn conflict_count(csp: &Csp) -> usize {
    csp.constraints()
        .iter()
        .map(|c| nogood_count(c, csp.domain_size()))
        .sum()
}

impl Encoder for DirectEncoder {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn clause_count(&self, csp: &Csp) -> usize {
        let n = csp.n_variables();
        n * n_choose_k(csp.domain_size(), 2) + n + conflict_count(csp)
    }

    fn encode(&self, csp: &Csp) -> Cnf {
        let n = csp.n_variables();
        let d = csp.domain_size();
        let mut builder = ClauseBuilder::new(self.name(), self.clause_count(csp));

        for v in 0..n {
            builder.value_at_most_one(v, d);
        }
        for v in 0..n {
            builder.value_at_least_one(v, d);
        }
        for nogood in nogoods(csp.constraints(), d) {
            builder.conflicts(&nogood, d);
        }
        builder.finish()
    }
}

impl Encoder for MultivaluedDirectEncoder {
    fn name(&self) -> &'static str {
        "multivalued-direct"
    }

    fn clause_count(&self, csp: &Csp) -> usize {
        csp.n_variables() + conflict_count(csp)
    }

    fn encode(&self, csp: &Csp) -> Cnf {
        let d = csp.domain_size();
        let mut builder = ClauseBuilder::new(self.name(), self.clause_count(csp));

        for v in 0..csp.n_variables() {
            builder.value_at_least_one(v, d);
        }
        for nogood in nogoods(csp.constraints(), d) {
            builder.conflicts(&nogood, d);
        }
        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::Literal;
    use crate::csp::Constraint;
    use crate::relation::Relation;

    fn neq_csp() -> Csp {
        // x0 != x1 over {0, 1}
        let r = Relation::from_rows([[1, 0], [0, 1]]).unwrap();
        Csp::new(vec![Constraint::new(r, vec![0, 1]).unwrap()])
    }

    #[test]
    fn test_direct_clause_layout() {
        let cnf = DirectEncoder.encode(&neq_csp());
        // 2 AMO, 2 ALO, 2 conflicts
        assert_eq!(cnf.len(), 6);
        assert_eq!(cnf.clauses()[0], vec![Literal::negated(0), Literal::negated(1)]);
        assert_eq!(cnf.clauses()[1], vec![Literal::negated(2), Literal::negated(3)]);
        assert_eq!(cnf.clauses()[2], vec![Literal::regular(0), Literal::regular(1)]);
        // Nogood (0, 0): not (x0 = 0 and x1 = 0)
        assert_eq!(cnf.clauses()[4], vec![Literal::negated(0), Literal::negated(2)]);
        // Nogood (1, 1)
        assert_eq!(cnf.clauses()[5], vec![Literal::negated(1), Literal::negated(3)]);
    }

    #[test]
    fn test_multivalued_direct_drops_amo() {
        let csp = neq_csp();
        let direct = DirectEncoder.encode(&csp);
        let multi = MultivaluedDirectEncoder.encode(&csp);
        assert_eq!(multi.len(), 4);
        assert_eq!(multi.clauses(), &direct.clauses()[2..]);
    }

    #[test]
    fn test_direct_clause_count_ternary() {
        let r = Relation::from_rows([[0, 1, 2], [2, 2, 0]]).unwrap();
        let csp = Csp::new(vec![Constraint::new(r, vec![0, 2, 1]).unwrap()]);
        // n = 3, d = 3: 3*3 + 3 + (27 - 2)
        assert_eq!(DirectEncoder.clause_count(&csp), 37);
        assert_eq!(DirectEncoder.encode(&csp).len(), 37);
        assert_eq!(MultivaluedDirectEncoder.clause_count(&csp), 28);
    }

    #[test]
    fn test_empty_csp() {
        assert!(DirectEncoder.encode(&Csp::default()).is_empty());
        assert!(MultivaluedDirectEncoder.encode(&Csp::default()).is_empty());
    }
}
