//! Rank classification and conformability of operands.

use smallvec::{smallvec, SmallVec};

use crate::errors::KernelError;
use crate::store::{Index, Store};
use crate::value::{Array, Value};

/// Capabilities shared by values which can be indexed like arrays.
pub trait ArrayLike<T> {
    /// Number of positions, including absent ones.
    fn len(&self) -> usize;

    /// Element at 1-based `index`, if present.
    fn element(&self, index: usize) -> Option<&T>;

    /// `(rows, cols)` if matrix metadata is attached.
    fn dims(&self) -> Option<(usize, usize)> {
        None
    }
}

impl<T> ArrayLike<T> for Store<T> {
    fn len(&self) -> usize {
        Store::len(self)
    }

    fn element(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<T> ArrayLike<T> for Array<T> {
    fn len(&self) -> usize {
        Array::len(self)
    }

    fn element(&self, index: usize) -> Option<&T> {
        Array::element(self, index)
    }

    fn dims(&self) -> Option<(usize, usize)> {
        let meta = self.meta();
        meta.rows.zip(meta.cols)
    }
}

/// Rank of a value, as seen by broadcast operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rank {
    Scalar,
    Vector { len: usize },
    Matrix { rows: usize, cols: usize },
}

impl Rank {
    /// Number of positions covered by a value of this rank.
    pub fn len(&self) -> usize {
        match *self {
            Rank::Scalar => 1,
            Rank::Vector { len } => len,
            Rank::Matrix { rows, cols } => rows.saturating_mul(cols),
        }
    }

    /// Extents of each dimension. Empty for scalars.
    pub fn dims(&self) -> SmallVec<[usize; 2]> {
        match *self {
            Rank::Scalar => SmallVec::new(),
            Rank::Vector { len } => smallvec![len],
            Rank::Matrix { rows, cols } => smallvec![rows, cols],
        }
    }
}

/// Classify an array-like value. It is a matrix if it has `rows` and `cols`
/// metadata whose product equals its length, and a vector otherwise.
pub fn rank_of<T, A: ArrayLike<T> + ?Sized>(array: &A) -> Rank {
    let len = array.len();
    match array.dims() {
        Some((rows, cols)) if rows.checked_mul(cols) == Some(len) => Rank::Matrix { rows, cols },
        _ => Rank::Vector { len },
    }
}

/// Classify a value as scalar, vector or matrix.
pub fn classify<T>(value: &Value<T>) -> Rank {
    value.rank()
}

/// Conformability rule applied by [`compatible`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Elementwise combination.
    Elementwise = 1,
    /// Product-style composition, where the columns of the left operand
    /// meet the rows of the right operand.
    Product = 2,
}

impl Mode {
    /// Map the numeric mode codes used by callers (1 or 2) to a mode.
    pub fn from_code(code: Index) -> Result<Mode, KernelError> {
        match code {
            1 => Ok(Mode::Elementwise),
            2 => Ok(Mode::Product),
            _ => Err(KernelError::InvalidArgument("unknown conformability mode")),
        }
    }
}

/// Result of a conformability check.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Conformance {
    Compatible,
    /// The operands conflict. Holds the extents of the left and right
    /// operand which do not match.
    Incompatible { left: usize, right: usize },
}

impl Conformance {
    pub fn is_compatible(&self) -> bool {
        matches!(self, Conformance::Compatible)
    }

    /// Convert an incompatibility into a [`KernelError::ShapeError`].
    pub fn into_result(self) -> Result<(), KernelError> {
        match self {
            Conformance::Compatible => Ok(()),
            Conformance::Incompatible { left, right } => {
                Err(KernelError::ShapeError { left, right })
            }
        }
    }

    fn of_extents(left: usize, right: usize) -> Conformance {
        if left == right {
            Conformance::Compatible
        } else {
            Conformance::Incompatible { left, right }
        }
    }
}

/// Check whether two values may be combined under `mode`.
pub fn compatible<A, B>(a1: &Value<A>, a2: &Value<B>, mode: Mode) -> Conformance {
    conformance(a1.rank(), a2.rank(), mode)
}

/// Check whether values of rank `r1` and `r2` may be combined under `mode`.
pub fn conformance(r1: Rank, r2: Rank, mode: Mode) -> Conformance {
    match (r1, r2, mode) {
        (Rank::Scalar, _, _) | (_, Rank::Scalar, _) => Conformance::Compatible,
        (Rank::Vector { len: n1 }, Rank::Vector { len: n2 }, _) => {
            Conformance::of_extents(n1, n2)
        }

        (Rank::Vector { len }, Rank::Matrix { rows, cols }, Mode::Elementwise) => {
            if matches_single_extent(len, rows, cols) {
                Conformance::Compatible
            } else {
                Conformance::Incompatible {
                    left: len,
                    right: rows.saturating_mul(cols),
                }
            }
        }
        (Rank::Matrix { rows, cols }, Rank::Vector { len }, Mode::Elementwise) => {
            if matches_single_extent(len, rows, cols) {
                Conformance::Compatible
            } else {
                Conformance::Incompatible {
                    left: rows.saturating_mul(cols),
                    right: len,
                }
            }
        }
        (
            Rank::Matrix { rows: r1, cols: c1 },
            Rank::Matrix { rows: r2, cols: c2 },
            Mode::Elementwise,
        ) => {
            if r1 != r2 {
                Conformance::Incompatible {
                    left: r1,
                    right: r2,
                }
            } else {
                Conformance::of_extents(c1, c2)
            }
        }

        (Rank::Vector { len }, Rank::Matrix { rows, .. }, Mode::Product) => {
            Conformance::of_extents(len, rows)
        }
        (Rank::Matrix { cols, .. }, Rank::Vector { len }, Mode::Product) => {
            Conformance::of_extents(cols, len)
        }
        (Rank::Matrix { cols, .. }, Rank::Matrix { rows, .. }, Mode::Product) => {
            Conformance::of_extents(cols, rows)
        }
    }
}

/// Return true if a one-row or one-column matrix has `len` elements along
/// its other dimension.
fn matches_single_extent(len: usize, rows: usize, cols: usize) -> bool {
    (rows == 1 && cols == len) || (cols == 1 && rows == len)
}
