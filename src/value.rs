//! Scalar and array values.

use crate::shape::{rank_of, Rank};
use crate::store::Store;

/// Shape metadata attached to an array.
///
/// The metadata is not kept in sync with the store. An array is treated as
/// a matrix only while `rows * cols == len`, see [`classify`](crate::classify).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ShapeMeta {
    /// Number of elements, including absent ones.
    pub len: usize,
    pub rows: Option<usize>,
    pub cols: Option<usize>,
}

impl ShapeMeta {
    pub fn vector(len: usize) -> ShapeMeta {
        ShapeMeta {
            len,
            rows: None,
            cols: None,
        }
    }

    /// Metadata for a `rows x cols` matrix.
    ///
    /// Panics if `rows * cols` overflows.
    pub fn matrix(rows: usize, cols: usize) -> ShapeMeta {
        let Some(len) = rows.checked_mul(cols) else {
            panic!("matrix size overflows");
        };
        ShapeMeta {
            len,
            rows: Some(rows),
            cols: Some(cols),
        }
    }
}

/// An element store together with its shape metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct Array<T> {
    store: Store<T>,
    meta: ShapeMeta,
}

impl<T> Array<T> {
    /// Create a vector whose length is the length of `store`.
    pub fn vector(store: Store<T>) -> Array<T> {
        let meta = ShapeMeta::vector(store.len());
        Array { store, meta }
    }

    /// Create a `rows x cols` matrix with row-major elements from `store`.
    ///
    /// Panics if `rows * cols` overflows.
    pub fn matrix(store: Store<T>, rows: usize, cols: usize) -> Array<T> {
        Array {
            store,
            meta: ShapeMeta::matrix(rows, cols),
        }
    }

    pub fn from_parts(store: Store<T>, meta: ShapeMeta) -> Array<T> {
        Array { store, meta }
    }

    /// Return the length recorded in the shape metadata.
    pub fn len(&self) -> usize {
        self.meta.len
    }

    pub fn is_empty(&self) -> bool {
        self.meta.len == 0
    }

    pub fn meta(&self) -> ShapeMeta {
        self.meta
    }

    pub fn meta_mut(&mut self) -> &mut ShapeMeta {
        &mut self.meta
    }

    pub fn store(&self) -> &Store<T> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store<T> {
        &mut self.store
    }

    pub fn into_store(self) -> Store<T> {
        self.store
    }

    /// Return the element at 1-based `index`.
    pub fn element(&self, index: usize) -> Option<&T> {
        self.store.get(index)
    }

    pub fn rank(&self) -> Rank {
        rank_of::<T, _>(self)
    }
}

impl<T> From<Vec<T>> for Array<T> {
    fn from(values: Vec<T>) -> Self {
        Array::vector(Store::from(values))
    }
}

impl<T, const N: usize> From<[T; N]> for Array<T> {
    fn from(values: [T; N]) -> Self {
        Array::vector(Store::from(values))
    }
}

/// A value passed to or returned from a broadcast operation.
#[derive(Clone, Debug, PartialEq)]
pub enum Value<T> {
    Scalar(T),
    Array(Array<T>),
}

impl<T> Value<T> {
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Return the number of positions this value covers in a broadcast: 1
    /// for a scalar, the array length otherwise.
    pub fn extent(&self) -> usize {
        match self {
            Value::Scalar(_) => 1,
            Value::Array(array) => array.len(),
        }
    }

    pub fn as_scalar(&self) -> Option<&T> {
        match self {
            Value::Scalar(x) => Some(x),
            Value::Array(_) => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array<T>> {
        match self {
            Value::Scalar(_) => None,
            Value::Array(array) => Some(array),
        }
    }

    pub fn into_array(self) -> Option<Array<T>> {
        match self {
            Value::Scalar(_) => None,
            Value::Array(array) => Some(array),
        }
    }

    pub fn rank(&self) -> Rank {
        match self {
            Value::Scalar(_) => Rank::Scalar,
            Value::Array(array) => array.rank(),
        }
    }
}

impl<T> From<Array<T>> for Value<T> {
    fn from(array: Array<T>) -> Self {
        Value::Array(array)
    }
}

impl<T> From<Vec<T>> for Value<T> {
    fn from(values: Vec<T>) -> Self {
        Value::Array(values.into())
    }
}

impl<T, const N: usize> From<[T; N]> for Value<T> {
    fn from(values: [T; N]) -> Self {
        Value::Array(values.into())
    }
}
