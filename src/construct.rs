//! Constructors for fresh arrays.

use crate::errors::KernelError;
use crate::limits::Limits;
use crate::store::{Index, Store};
use crate::value::{Array, ShapeMeta};

/// Convert one extent (vector) or two extents (rows, columns) to shape
/// metadata.
fn shape_meta(dims: &[Index]) -> Result<ShapeMeta, KernelError> {
    let extent =
        |n: Index| usize::try_from(n).map_err(|_| KernelError::InvalidArgument("extent is negative"));
    match *dims {
        [len] => Ok(ShapeMeta::vector(extent(len)?)),
        [rows, cols] => {
            let (rows, cols) = (extent(rows)?, extent(cols)?);
            rows.checked_mul(cols)
                .ok_or(KernelError::InvalidArgument("array size overflows"))?;
            Ok(ShapeMeta::matrix(rows, cols))
        }
        _ => Err(KernelError::InvalidArgument("expected one or two extents")),
    }
}

/// Create an array with every element a copy of `value`, or `T::default()`
/// if `value` is `None`.
///
/// `dims` is `[len]` for a vector or `[rows, cols]` for a matrix.
///
/// ```
/// use apl_kernel::{rho, Rank};
///
/// let zeros = rho(Some(0), &[3, 2]).unwrap();
/// assert_eq!(zeros.rank(), Rank::Matrix { rows: 3, cols: 2 });
/// ```
pub fn rho<T: Clone + Default>(
    value: Option<T>,
    dims: &[Index],
) -> Result<Array<T>, KernelError> {
    rho_with(value, dims, Limits::global())
}

/// Variant of [`rho`] which uses explicit limits.
pub fn rho_with<T: Clone + Default>(
    value: Option<T>,
    dims: &[Index],
    limits: &Limits,
) -> Result<Array<T>, KernelError> {
    let meta = shape_meta(dims)?;
    limits.check_len(meta.len)?;

    let fill = value.unwrap_or_default();
    let store = Store::from(vec![fill; meta.len]);
    Ok(Array::from_parts(store, meta))
}

/// Conversion from 1-based positions to element values, used by [`iota`].
pub trait FromIndex {
    fn from_index(index: usize) -> Self;
}

macro_rules! impl_from_index {
    ($($ty:ty),*) => {
        $(
            impl FromIndex for $ty {
                fn from_index(index: usize) -> Self {
                    index as $ty
                }
            }
        )*
    };
}

impl_from_index!(i32, i64, isize, u32, u64, usize, f32, f64);

/// Create the vector `[1, 2, ..., n]`.
pub fn iota<T: FromIndex>(n: Index) -> Result<Array<T>, KernelError> {
    iota_with(n, Limits::global())
}

/// Variant of [`iota`] which uses explicit limits.
pub fn iota_with<T: FromIndex>(n: Index, limits: &Limits) -> Result<Array<T>, KernelError> {
    let len = usize::try_from(n).map_err(|_| KernelError::InvalidArgument("extent is negative"))?;
    limits.check_len(len)?;
    Ok(Array::vector((1..=len).map(T::from_index).collect()))
}
