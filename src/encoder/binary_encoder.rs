// Bitwise encodings: each variable is a little-endian vector of b = max(1, ceil(log2 d)) bits
//
// Bit k of variable v is boolean `v * b + k`.

use super::clauses::ClauseBuilder;
use super::nogoods::{nogood_count, nogoods};
use super::traits::{n_bits, Encoder};
use crate::cnf::{Clause, Cnf, Literal};
use crate::csp::{Csp, Variable};
use crate::relation::DomainValue;

/// Binary encoding: nogoods are taken over the padded domain `2^b`, which also
/// rules out the unused bit patterns of every constrained variable.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryEncoder;

/// Log encoding: nogoods over the true domain, plus one clause per variable
/// for every bit pattern in `[d, 2^b)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEncoder;

/// Clause forbidding the assignment of `values` to `variables`
fn forbid(variables: &[Variable], values: &[DomainValue], bits: usize) -> Clause {
    let mut clause = Vec::with_capacity(variables.len() * bits);
    for (&v, &value) in variables.iter().zip(values) {
        for k in 0..bits {
            let literal = v * bits + k;
            if (value >> k) & 1 == 1 {
                clause.push(Literal::negated(literal));
            } else {
                clause.push(Literal::regular(literal));
            }
        }
    }
    clause
}

fn encode_nogoods(builder: &mut ClauseBuilder, csp: &Csp, domain_size: usize, bits: usize) {
    for nogood in nogoods(csp.constraints(), domain_size) {
        for row in nogood.relation() {
            builder.push(forbid(nogood.variables(), row, bits));
        }
    }
}

fn total_nogoods(csp: &Csp, domain_size: usize) -> usize {
    csp.constraints()
        .iter()
        .map(|c| nogood_count(c, domain_size))
        .sum()
}

impl Encoder for BinaryEncoder {
    fn name(&self) -> &'static str {
        "binary"
    }

    fn clause_count(&self, csp: &Csp) -> usize {
        total_nogoods(csp, 1 << n_bits(csp.domain_size()))
    }

    fn encode(&self, csp: &Csp) -> Cnf {
        let bits = n_bits(csp.domain_size());
        let mut builder = ClauseBuilder::new(self.name(), self.clause_count(csp));
        encode_nogoods(&mut builder, csp, 1 << bits, bits);
        builder.finish()
    }
}

impl Encoder for LogEncoder {
    fn name(&self) -> &'static str {
        "log"
    }

    fn clause_count(&self, csp: &Csp) -> usize {
        let d = csp.domain_size();
        let unused = (1usize << n_bits(d)).saturating_sub(d);
        total_nogoods(csp, d) + csp.n_variables() * unused
    }

    fn encode(&self, csp: &Csp) -> Cnf {
        let d = csp.domain_size();
        let bits = n_bits(d);
        let mut builder = ClauseBuilder::new(self.name(), self.clause_count(csp));

        encode_nogoods(&mut builder, csp, d, bits);
        for v in 0..csp.n_variables() {
            for value in d..1 << bits {
                builder.push(forbid(&[v], &[value], bits));
            }
        }
        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::Constraint;
    use crate::relation::Relation;

    fn csp(rows: &[[usize; 2]]) -> Csp {
        let r = Relation::from_rows(rows.iter().copied()).unwrap();
        Csp::new(vec![Constraint::new(r, vec![0, 1]).unwrap()])
    }

    #[test]
    fn test_forbid_bit_polarity() {
        // v = 1, value 2 = 0b10, two bits: literals 2 and 3
        let clause = forbid(&[1], &[2], 2);
        assert_eq!(clause, vec![Literal::regular(2), Literal::negated(3)]);
    }

    #[test]
    fn test_binary_pads_domain() {
        // d = 3, b = 2: 16 tuples over the padded domain, 3 allowed
        let c = csp(&[[1, 0], [2, 0], [0, 2]]);
        assert_eq!(BinaryEncoder.clause_count(&c), 13);
        let cnf = BinaryEncoder.encode(&c);
        assert_eq!(cnf.len(), 13);
        assert!(cnf.clauses().iter().all(|clause| clause.len() == 4));
        assert_eq!(cnf.n_variables(), 4);
    }

    #[test]
    fn test_log_prohibits_unused_patterns() {
        let c = csp(&[[1, 0], [2, 0], [0, 2]]);
        // 9 - 3 nogoods, then value 3 forbidden for both variables
        assert_eq!(LogEncoder.clause_count(&c), 8);
        let cnf = LogEncoder.encode(&c);
        assert_eq!(cnf.clauses()[6], vec![Literal::negated(0), Literal::negated(1)]);
        assert_eq!(cnf.clauses()[7], vec![Literal::negated(2), Literal::negated(3)]);
    }

    #[test]
    fn test_power_of_two_domain() {
        // d = 2: binary and log coincide
        let c = csp(&[[1, 0]]);
        assert_eq!(BinaryEncoder.encode(&c), LogEncoder.encode(&c));
        assert_eq!(BinaryEncoder.encode(&c).len(), 3);
    }
}
