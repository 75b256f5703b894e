//! Ranged get, set, move and transpose over element stores.
//!
//! A range `a..b` is inclusive at both ends and is traversed in ascending
//! order if `a <= b` or descending order otherwise.

use crate::errors::KernelError;
use crate::limits::Limits;
use crate::store::{check_index, range_len, step, Index, Store};

/// Return the elements at `a..b`, in traversal order.
///
/// Absent elements are returned as `None`. Fails with
/// [`KernelError::CapacityExceeded`] if the range is longer than the global
/// [`Limits`] allow.
pub fn get_range<T: Clone>(
    store: &Store<T>,
    a: Index,
    b: Index,
) -> Result<Vec<Option<T>>, KernelError> {
    get_range_with(store, a, b, Limits::global())
}

/// Variant of [`get_range`] which uses explicit limits.
pub fn get_range_with<T: Clone>(
    store: &Store<T>,
    a: Index,
    b: Index,
    limits: &Limits,
) -> Result<Vec<Option<T>>, KernelError> {
    check_index(a, "range start must be positive")?;
    check_index(b, "range end must be positive")?;
    limits.check_len(range_len(a, b))?;

    Ok(positions(a, b)
        .map(|i| store.get(i).cloned())
        .collect())
}

/// Write `values` to the positions `a..b`, cycling through `values` if there
/// are fewer values than positions.
///
/// If `b` is `None` the range covers exactly `values.len()` positions
/// ascending from `a`. Supplying no values leaves the store unchanged.
///
/// The store grows to hold the highest written index, so writes beyond the
/// global [`Limits`] fail with [`KernelError::CapacityExceeded`].
pub fn set_range<'a, T: Clone>(
    store: &'a mut Store<T>,
    a: Index,
    b: Option<Index>,
    values: &[Option<T>],
) -> Result<&'a mut Store<T>, KernelError> {
    set_range_with(store, a, b, values, Limits::global())
}

/// Variant of [`set_range`] which uses explicit limits.
pub fn set_range_with<'a, T: Clone>(
    store: &'a mut Store<T>,
    a: Index,
    b: Option<Index>,
    values: &[Option<T>],
    limits: &Limits,
) -> Result<&'a mut Store<T>, KernelError> {
    check_index(a, "range start must be positive")?;
    if values.is_empty() {
        return Ok(store);
    }
    let b = match b {
        Some(b) => b,
        None => a
            .checked_add_unsigned(values.len() - 1)
            .ok_or(KernelError::InvalidArgument("range end overflows"))?,
    };
    check_index(b, "range end must be positive")?;
    limits.check_len(a.max(b) as usize)?;

    for (pos, value) in positions(a, b).zip(values.iter().cycle()) {
        store.set(pos, value.clone());
    }
    Ok(store)
}

/// Copy the range `a1..b1` of `store` to a destination range starting at
/// `a2`.
///
/// If `b2` is `None` the destination has the same length and direction as
/// the source. Otherwise the destination is `a2..b2`, which must have the
/// same length as the source; if its direction differs the elements are
/// written in reverse order. Source and destination may overlap, in which
/// case the result is the same as if the source were first copied to a
/// temporary buffer.
///
/// Fails with [`KernelError::CapacityExceeded`] if the destination reaches
/// beyond the global [`Limits`].
pub fn move_range<T: Clone>(
    store: &mut Store<T>,
    a1: Index,
    b1: Index,
    a2: Index,
    b2: Option<Index>,
) -> Result<&mut Store<T>, KernelError> {
    move_range_with(store, a1, b1, a2, b2, Limits::global())
}

/// Variant of [`move_range`] which uses explicit limits.
pub fn move_range_with<'a, T: Clone>(
    store: &'a mut Store<T>,
    a1: Index,
    b1: Index,
    a2: Index,
    b2: Option<Index>,
    limits: &Limits,
) -> Result<&'a mut Store<T>, KernelError> {
    check_index(a1, "source start must be positive")?;
    check_index(b1, "source end must be positive")?;
    check_index(a2, "destination start must be positive")?;

    let src_len = range_len(a1, b1);
    let inc1 = step(a1, b1);
    let (b2, inc2) = match b2 {
        Some(b2) => {
            let dest_len = range_len(a2, b2);
            if dest_len != src_len {
                return Err(KernelError::LengthMismatch {
                    source: src_len,
                    dest: dest_len,
                });
            }
            (b2, step(a2, b2))
        }
        None => {
            let b2 = a2
                .checked_add(b1 - a1)
                .ok_or(KernelError::InvalidArgument("destination end overflows"))?;
            (b2, inc1)
        }
    };
    check_index(b2, "destination end must be positive")?;
    limits.check_len(a2.max(b2) as usize)?;

    if inc1 != inc2 {
        if limits.trace_moves {
            log::trace!("move {}..{} -> {}..{}: reversing", a1, b1, a2, b2);
        }
        move_reversed(store, a1, b1, a2, b2);
    } else if (a2 - a1) * inc1 < 0 {
        // Destination trails the source, so copying from the front never
        // overwrites an element that is still to be read.
        if limits.trace_moves {
            log::trace!("move {}..{} -> {}..{}: front to back", a1, b1, a2, b2);
        }
        for k in 0..src_len as Index {
            copy_slot(store, a1 + k * inc1, a2 + k * inc1);
        }
    } else {
        if limits.trace_moves {
            log::trace!("move {}..{} -> {}..{}: back to front", a1, b1, a2, b2);
        }
        for k in (0..src_len as Index).rev() {
            copy_slot(store, a1 + k * inc1, a2 + k * inc1);
        }
    }

    Ok(store)
}

/// Move a range to a destination of opposite direction.
///
/// Source position `p` maps to `s_lo + d_hi - p`, which maps the overlap of
/// the two ranges onto itself. Source elements outside the overlap land
/// outside the source, so they are copied first, then the overlap is
/// reversed in place.
fn move_reversed<T: Clone>(store: &mut Store<T>, a1: Index, b1: Index, a2: Index, b2: Index) {
    let (s_lo, s_hi) = (a1.min(b1), a1.max(b1));
    let (d_lo, d_hi) = (a2.min(b2), a2.max(b2));
    let target = |p: Index| s_lo + d_hi - p;

    let (mut i_lo, mut i_hi) = (s_lo.max(d_lo), s_hi.min(d_hi));
    if i_lo > i_hi {
        // Disjoint. Treat the whole source as head.
        i_lo = s_hi + 1;
        i_hi = s_hi;
    }

    for p in s_lo..i_lo {
        copy_slot(store, p, target(p));
    }
    for p in (i_hi + 1..=s_hi).rev() {
        copy_slot(store, p, target(p));
    }
    while i_lo < i_hi {
        store.swap(i_lo as usize, i_hi as usize);
        i_lo += 1;
        i_hi -= 1;
    }
}

fn copy_slot<T: Clone>(store: &mut Store<T>, from: Index, to: Index) {
    let value = store.get(from as usize).cloned();
    store.set(to as usize, value);
}

/// Transpose the row-major `m x n` matrix in `src` into `dest`, so that
/// `dest` holds the row-major `n x m` transpose.
///
/// Absent source elements clear the corresponding destination slot. Fails
/// with [`KernelError::CapacityExceeded`] if `m * n` exceeds the global
/// [`Limits`].
///
/// In-place transposition is not supported. Callers holding shared handles
/// should use [`transpose_shared`](crate::transpose_shared), which reports
/// aliasing as an error.
pub fn transpose<'a, T: Clone>(
    src: &Store<T>,
    m: Index,
    n: Index,
    dest: &'a mut Store<T>,
) -> Result<&'a mut Store<T>, KernelError> {
    transpose_with(src, m, n, dest, Limits::global())
}

/// Variant of [`transpose`] which uses explicit limits.
pub fn transpose_with<'a, T: Clone>(
    src: &Store<T>,
    m: Index,
    n: Index,
    dest: &'a mut Store<T>,
    limits: &Limits,
) -> Result<&'a mut Store<T>, KernelError> {
    let m = check_index(m, "row count must be positive")?;
    let n = check_index(n, "column count must be positive")?;
    let size = m
        .checked_mul(n)
        .ok_or(KernelError::InvalidArgument("matrix size overflows"))?;
    limits.check_len(size)?;

    for i in 0..m {
        for j in 0..n {
            dest.set(i + j * m + 1, src.get(j + i * n + 1).cloned());
        }
    }
    Ok(dest)
}

/// Iterate over the 1-based positions of the valid range `a..b`.
pub(crate) fn positions(a: Index, b: Index) -> impl Iterator<Item = usize> {
    let inc = step(a, b);
    (0..range_len(a, b) as Index).map(move |k| (a + k * inc) as usize)
}
