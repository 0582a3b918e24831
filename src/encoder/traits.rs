// Encoder trait and combinatorial helpers shared by the encoders

use crate::cnf::Cnf;
use crate::csp::Csp;

/// CSP to CNF encoder.
///
/// `clause_count` is exact: `encode(csp).len() == clause_count(csp)` for every
/// CSP, and every implementation asserts it while encoding.
pub trait Encoder {
    /// Name used on the command line and in logs
    fn name(&self) -> &'static str;

    /// Number of clauses `encode` emits for `csp`
    fn clause_count(&self, csp: &Csp) -> usize;

    /// Encode `csp` into a single, exactly-sized CNF
    fn encode(&self, csp: &Csp) -> Cnf;
}

/// Binomial coefficient C(n, k); 0 when k > n
pub fn n_choose_k(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result = 1;
    for i in 0..k {
        result = result * (n - i) / (i + 1);
    }
    result
}

/// Bits per variable for the bitwise encodings: max(1, ceil(log2 d))
pub fn n_bits(domain_size: usize) -> usize {
    let bits = usize::BITS - domain_size.saturating_sub(1).leading_zeros();
    (bits as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_n_choose_k() {
        assert_eq!(n_choose_k(0, 0), 1);
        assert_eq!(n_choose_k(5, 0), 1);
        assert_eq!(n_choose_k(5, 2), 10);
        assert_eq!(n_choose_k(6, 3), 20);
        assert_eq!(n_choose_k(1, 2), 0);
        assert_eq!(n_choose_k(30, 15), 155_117_520);
    }

    #[test]
    fn test_n_bits() {
        assert_eq!(n_bits(0), 1);
        assert_eq!(n_bits(1), 1);
        assert_eq!(n_bits(2), 1);
        assert_eq!(n_bits(3), 2);
        assert_eq!(n_bits(4), 2);
        assert_eq!(n_bits(5), 3);
        assert_eq!(n_bits(64), 6);
        assert_eq!(n_bits(65), 7);
    }
}
