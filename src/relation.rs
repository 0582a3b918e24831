// Relation: a set of fixed-arity tuples over the domain {0 .. domain_size-1}

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::ops::{Deref, Index};

use crate::error::{CspError, Result};

/// A value of the finite domain `{0 .. domain_size-1}`
pub type DomainValue = usize;

/// Immutable fixed-arity tuple of domain values.
///
/// Ordered by length first, then element-wise.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tuple(Box<[DomainValue]>);

impl Tuple {
    pub fn new(values: Vec<DomainValue>) -> Self {
        Tuple(values.into_boxed_slice())
    }

    pub fn arity(&self) -> usize {
        self.0.len()
    }

    pub fn values(&self) -> &[DomainValue] {
        &self.0
    }

    /// All coordinates equal (vacuously true for arity 0 and 1)
    pub fn is_constant(&self) -> bool {
        self.0.windows(2).all(|w| w[0] == w[1])
    }
}

impl Deref for Tuple {
    type Target = [DomainValue];

    fn deref(&self) -> &[DomainValue] {
        &self.0
    }
}

impl From<Vec<DomainValue>> for Tuple {
    fn from(values: Vec<DomainValue>) -> Self {
        Tuple::new(values)
    }
}

impl<const N: usize> From<[DomainValue; N]> for Tuple {
    fn from(values: [DomainValue; N]) -> Self {
        Tuple::new(values.to_vec())
    }
}

impl From<&[DomainValue]> for Tuple {
    fn from(values: &[DomainValue]) -> Self {
        Tuple(values.into())
    }
}

impl Ord for Tuple {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Tuple {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, ")")
    }
}

/// Relation: arity plus an ordered collection of distinct tuples of that arity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    arity: usize,
    tuples: Vec<Tuple>,
}

impl Relation {
    /// Build a relation, rejecting tuples of the wrong arity and duplicates
    pub fn new(arity: usize, tuples: Vec<Tuple>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(tuples.len());
        for tuple in &tuples {
            if tuple.arity() != arity {
                return Err(CspError::ArityMismatch {
                    expected: arity,
                    actual: tuple.arity(),
                });
            }
            if !seen.insert(tuple) {
                return Err(CspError::DuplicateTuple(tuple.to_string()));
            }
        }
        Ok(Relation { arity, tuples })
    }

    /// Build a relation from rows, taking the arity from the first row
    pub fn from_rows<I, T>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Tuple>,
    {
        let tuples: Vec<Tuple> = rows.into_iter().map(Into::into).collect();
        let arity = tuples.first().ok_or(CspError::EmptyRelation)?.arity();
        Relation::new(arity, tuples)
    }

    /// Tuples already known to be distinct and of the right arity
    pub(crate) fn from_tuples_unchecked(arity: usize, tuples: Vec<Tuple>) -> Self {
        debug_assert!(tuples.iter().all(|t| t.arity() == arity));
        Relation { arity, tuples }
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    pub fn tuples(&self) -> &[Tuple] {
        &self.tuples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tuple> {
        self.tuples.iter()
    }

    pub fn contains(&self, values: &[DomainValue]) -> bool {
        self.tuples.iter().any(|t| t.values() == values)
    }

    /// Largest value occurring in any tuple
    pub fn max_value(&self) -> Option<DomainValue> {
        self.tuples.iter().flat_map(|t| t.iter()).copied().max()
    }

    /// Same relation with its tuples in ascending order
    pub fn sorted(&self) -> Relation {
        let mut tuples = self.tuples.clone();
        tuples.sort();
        Relation {
            arity: self.arity,
            tuples,
        }
    }
}

impl Index<usize> for Relation {
    type Output = Tuple;

    fn index(&self, i: usize) -> &Tuple {
        &self.tuples[i]
    }
}

impl<'a> IntoIterator for &'a Relation {
    type Item = &'a Tuple;
    type IntoIter = std::slice::Iter<'a, Tuple>;

    fn into_iter(self) -> Self::IntoIter {
        self.tuples.iter()
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, t) in self.tuples.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", t)?;
        }
        write!(f, "]")
    }
}
