//! Elementwise application of unary and binary functions to scalars and
//! arrays.

use crate::errors::KernelError;
use crate::shape::{compatible, Mode, Rank};
use crate::store::Store;
use crate::value::{Array, ShapeMeta, Value};

/// Apply `f` to a scalar, or to each element of an array.
///
/// For arrays the result has the same shape metadata as `a`, and positions
/// where `a` has no element are left empty.
pub fn each<T, U, F>(mut f: F, a: &Value<T>) -> Value<U>
where
    F: FnMut(&T) -> U,
{
    match a {
        Value::Scalar(x) => Value::Scalar(f(x)),
        Value::Array(array) => {
            let slots = (1..=array.len())
                .map(|i| array.element(i).map(&mut f))
                .collect();
            Value::Array(Array::from_parts(Store::from_slots(slots), array.meta()))
        }
    }
}

/// One side of a binary broadcast.
enum Operand<'a, T> {
    /// The same value, which may be absent, at every position.
    Repeat(Option<&'a T>),
    Elements(&'a Array<T>),
}

impl<T> Operand<'_, T> {
    fn at(&self, index: usize) -> Option<&T> {
        match self {
            Operand::Repeat(value) => *value,
            Operand::Elements(array) => array.element(index),
        }
    }
}

/// Return the single value of a length-1 operand.
fn single<T>(value: &Value<T>) -> Option<&T> {
    match value {
        Value::Scalar(x) => Some(x),
        Value::Array(array) => array.element(1),
    }
}

/// Apply `f` to corresponding elements of `a1` and `a2`.
///
/// If both operands are scalars the result is the scalar `f(a1, a2)`.
/// Otherwise the result is an array whose length is the larger of the two
/// operand extents. Scalars are repeated across every position.
///
/// When `extend2` is set and `a2` is a scalar or a length-1 array while `a1`
/// is an array, the single value of `a2` is repeated across every position
/// without checking conformability, and likewise for `extend1`. If both
/// operands could be extended the second one is. Otherwise the operands
/// must be compatible under [`Mode::Elementwise`], or this fails with
/// [`KernelError::ShapeError`].
///
/// Positions where either operand has no element are left empty. The result
/// takes the row and column metadata of `a1` if it is a matrix, or of `a2`
/// otherwise.
pub fn both<A, B, U, F>(
    mut f: F,
    a1: &Value<A>,
    a2: &Value<B>,
    extend1: bool,
    extend2: bool,
) -> Result<Value<U>, KernelError>
where
    F: FnMut(&A, &B) -> U,
{
    if let (Value::Scalar(x), Value::Scalar(y)) = (a1, a2) {
        return Ok(Value::Scalar(f(x, y)));
    }

    let len = a1.extent().max(a2.extent());
    let can_extend2 = extend2 && a2.extent() == 1 && a1.is_array();
    let can_extend1 = extend1 && a1.extent() == 1 && a2.is_array() && !can_extend2;

    if !can_extend1 && !can_extend2 {
        if let Err(err) = compatible(a1, a2, Mode::Elementwise).into_result() {
            log::debug!(
                "cannot broadcast {:?} with {:?}: {}",
                a1.rank(),
                a2.rank(),
                err
            );
            return Err(err);
        }
    } else {
        log::trace!(
            "broadcasting single value of operand {} across {} positions",
            if can_extend2 { 2 } else { 1 },
            len
        );
    }

    let lhs = match a1 {
        Value::Array(array) if !can_extend1 => Operand::Elements(array),
        _ => Operand::Repeat(single(a1)),
    };
    let rhs = match a2 {
        Value::Array(array) if !can_extend2 => Operand::Elements(array),
        _ => Operand::Repeat(single(a2)),
    };

    let slots = (1..=len)
        .map(|i| match (lhs.at(i), rhs.at(i)) {
            (Some(x), Some(y)) => Some(f(x, y)),
            _ => None,
        })
        .collect();

    let mut meta = ShapeMeta::vector(len);
    if let Value::Array(array) = a2 {
        meta.rows = array.meta().rows;
        meta.cols = array.meta().cols;
    }
    if let Value::Array(array) = a1 {
        if let Rank::Matrix { rows, cols } = array.rank() {
            meta.rows = Some(rows);
            meta.cols = Some(cols);
        }
    }

    Ok(Value::Array(Array::from_parts(
        Store::from_slots(slots),
        meta,
    )))
}
