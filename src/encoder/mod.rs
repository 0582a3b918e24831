// Encoder module: CSP to CNF encodings

pub mod traits;
pub mod nogoods;
mod clauses;
pub mod direct_encoder;
pub mod binary_encoder;
pub mod support_encoder;
pub mod label_cover_encoder;

use std::fmt;
use std::str::FromStr;

use crate::cnf::Cnf;
use crate::csp::Csp;
use crate::error::CspError;

pub use traits::{n_bits, n_choose_k, Encoder};
pub use nogoods::{inverse, nogoods};
pub use direct_encoder::{DirectEncoder, MultivaluedDirectEncoder};
pub use binary_encoder::{BinaryEncoder, LogEncoder};
pub use support_encoder::SupportEncoder;
pub use label_cover_encoder::{LabelCoverEncoder, MultivaluedLabelCoverEncoder};

/// Encoder selected at runtime, by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Direct,
    MultivaluedDirect,
    Binary,
    Log,
    Support,
    LabelCover,
    MultivaluedLabelCover,
}

impl Encoding {
    pub const ALL: [Encoding; 7] = [
        Encoding::Direct,
        Encoding::MultivaluedDirect,
        Encoding::Binary,
        Encoding::Log,
        Encoding::Support,
        Encoding::LabelCover,
        Encoding::MultivaluedLabelCover,
    ];

    fn encoder(self) -> &'static dyn Encoder {
        match self {
            Encoding::Direct => &DirectEncoder,
            Encoding::MultivaluedDirect => &MultivaluedDirectEncoder,
            Encoding::Binary => &BinaryEncoder,
            Encoding::Log => &LogEncoder,
            Encoding::Support => &SupportEncoder,
            Encoding::LabelCover => &LabelCoverEncoder,
            Encoding::MultivaluedLabelCover => &MultivaluedLabelCoverEncoder,
        }
    }
}

impl Encoder for Encoding {
    fn name(&self) -> &'static str {
        self.encoder().name()
    }

    fn clause_count(&self, csp: &Csp) -> usize {
        self.encoder().clause_count(csp)
    }

    fn encode(&self, csp: &Csp) -> Cnf {
        self.encoder().encode(csp)
    }
}

impl FromStr for Encoding {
    type Err = CspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Encoding::ALL
            .into_iter()
            .find(|e| e.name() == s)
            .ok_or_else(|| CspError::UnknownEncoding(s.to_string()))
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
