//! Error types reported by the range, ordering and broadcast operations.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors that can occur in any kernel operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KernelError {
    /// An index or extent is out of range, a required value is missing, or
    /// two operands which must be distinct stores are the same store.
    InvalidArgument(&'static str),

    /// An explicit destination range of a move has a different length than
    /// the source range.
    LengthMismatch { source: usize, dest: usize },

    /// Operands of a broadcast are not conformable. Holds the two extents
    /// which conflict.
    ShapeError { left: usize, right: usize },

    /// A comparator reported that the pivot precedes itself.
    InvalidComparator,

    /// An operation would materialize more elements than allowed by the
    /// configured [`Limits`](crate::Limits).
    CapacityExceeded { requested: usize, limit: usize },
}

impl Display for KernelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            KernelError::LengthMismatch { source, dest } => write!(
                f,
                "source and destination must have the same length ({} vs {})",
                source, dest
            ),
            KernelError::ShapeError { left, right } => {
                write!(f, "operands are not conformable ({} vs {})", left, right)
            }
            KernelError::InvalidComparator => write!(f, "invalid order function for sorting"),
            KernelError::CapacityExceeded { requested, limit } => write!(
                f,
                "range of {} elements exceeds limit of {}",
                requested, limit
            ),
        }
    }
}

impl Error for KernelError {}
