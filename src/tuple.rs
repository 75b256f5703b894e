//! Searching a range with a predicate and mapping argument lists.

use std::hash::Hash;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::errors::KernelError;
use crate::range::positions;
use crate::store::{check_index, Index, Store};

/// Return the index of the `count`-th element of `a..b`, in traversal
/// order, for which `pred` holds.
///
/// `count` defaults to 1. Absent elements are passed to `pred` as `None`.
/// Returns `None` if fewer than `count` elements match, or if `count` is
/// zero or negative.
pub fn pick<T, P>(
    store: &Store<T>,
    a: Index,
    b: Index,
    mut pred: P,
    count: Option<Index>,
) -> Result<Option<Index>, KernelError>
where
    P: FnMut(Option<&T>) -> bool,
{
    check_index(a, "range start must be positive")?;
    check_index(b, "range end must be positive")?;
    let mut remaining = count.unwrap_or(1);
    if remaining <= 0 {
        return Ok(None);
    }

    for pos in positions(a, b) {
        if pred(store.get(pos)) {
            remaining -= 1;
            if remaining == 0 {
                return Ok(Some(pos as Index));
            }
        }
    }
    Ok(None)
}

/// Source of values for [`map`].
pub enum Mapper<'a, K, V> {
    /// Call a function with each value.
    Func(&'a dyn Fn(&K) -> V),
    /// Look each value up in a table. Values not in the table map to `None`.
    Table(&'a FxHashMap<K, V>),
}

/// Map each of `values` through `mapper`, returning one output per input.
pub fn map<K, V>(mapper: &Mapper<K, V>, values: &[K]) -> SmallVec<[Option<V>; 4]>
where
    K: Eq + Hash,
    V: Clone,
{
    match mapper {
        Mapper::Func(f) => values.iter().map(|k| Some(f(k))).collect(),
        Mapper::Table(table) => values.iter().map(|k| table.get(k).cloned()).collect(),
    }
}
