//! Element stores: 1-based, growable sequences with holes.

use crate::errors::KernelError;

/// Signed index or extent, as supplied by callers.
///
/// Indices are signed at the API boundary so that zero or negative values
/// are reported as errors rather than wrapping.
pub type Index = isize;

/// An ordered mapping from 1-based indices to values.
///
/// Any index may be absent. Reading an absent index yields `None`, writing
/// past the end grows the store. The length of a store is its highest
/// present index, so two stores with the same present elements compare
/// equal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Store<T> {
    slots: Vec<Option<T>>,
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Store { slots: Vec::new() }
    }
}

impl<T> Store<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from a sequence of slots, where `None` marks a hole.
    pub fn from_slots(slots: Vec<Option<T>>) -> Self {
        let mut store = Store { slots };
        store.trim();
        store
    }

    /// Return the highest present index, or zero if the store is empty.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Return the element at 1-based `index`, or `None` if it is absent.
    pub fn get(&self, index: usize) -> Option<&T> {
        index
            .checked_sub(1)
            .and_then(|i| self.slots.get(i))
            .and_then(|slot| slot.as_ref())
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        index
            .checked_sub(1)
            .and_then(|i| self.slots.get_mut(i))
            .and_then(|slot| slot.as_mut())
    }

    /// Store `value` at 1-based `index`, or clear the slot if `value` is
    /// `None`.
    ///
    /// Slots are allocated up to `index`. The range operations bound the
    /// indices they write by [`Limits`](crate::Limits) before calling this.
    ///
    /// Panics if `index` is zero.
    pub fn set(&mut self, index: usize, value: Option<T>) {
        assert!(index >= 1, "store indices start at 1");
        match value {
            Some(value) => {
                self.grow_to(index);
                self.slots[index - 1] = Some(value);
            }
            None => {
                if index <= self.slots.len() {
                    self.slots[index - 1] = None;
                    self.trim();
                }
            }
        }
    }

    /// Remove and return the element at `index`, leaving a hole.
    pub fn take(&mut self, index: usize) -> Option<T> {
        let value = index
            .checked_sub(1)
            .and_then(|i| self.slots.get_mut(i))
            .and_then(|slot| slot.take());
        self.trim();
        value
    }

    /// Exchange the contents of slots `i` and `j`. Either may be absent.
    ///
    /// Panics if either index is zero.
    pub fn swap(&mut self, i: usize, j: usize) {
        assert!(i >= 1 && j >= 1, "store indices start at 1");
        if i == j {
            return;
        }
        self.grow_to(i.max(j));
        self.slots.swap(i - 1, j - 1);
        self.trim();
    }

    /// Iterate over slots `1..=len()`.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Option<&T>> + '_ {
        self.slots.iter().map(|slot| slot.as_ref())
    }

    /// Return the slots of this store, in index order.
    pub fn into_slots(self) -> Vec<Option<T>> {
        self.slots
    }

    /// Return true if every slot in `lo..=hi` holds an element.
    pub(crate) fn all_present(&self, lo: usize, hi: usize) -> bool {
        lo >= 1
            && self
                .slots
                .get(lo - 1..hi)
                .is_some_and(|slots| slots.iter().all(|slot| slot.is_some()))
    }

    /// Call `f` with a mutable view of slots `lo..=hi`, growing the store
    /// first if needed.
    pub(crate) fn with_slots<R>(
        &mut self,
        lo: usize,
        hi: usize,
        f: impl FnOnce(&mut [Option<T>]) -> R,
    ) -> R {
        self.grow_to(hi);
        let result = f(&mut self.slots[lo - 1..hi]);
        self.trim();
        result
    }

    fn grow_to(&mut self, len: usize) {
        if self.slots.len() < len {
            self.slots.resize_with(len, || None);
        }
    }

    fn trim(&mut self) {
        while matches!(self.slots.last(), Some(None)) {
            self.slots.pop();
        }
    }
}

impl<T: Clone> Store<T> {
    /// Return a copy of slots `1..=len()`.
    pub fn to_slots(&self) -> Vec<Option<T>> {
        self.slots.clone()
    }
}

impl<T> From<Vec<T>> for Store<T> {
    fn from(values: Vec<T>) -> Self {
        Store {
            slots: values.into_iter().map(Some).collect(),
        }
    }
}

impl<T, const N: usize> From<[T; N]> for Store<T> {
    fn from(values: [T; N]) -> Self {
        Store {
            slots: values.into_iter().map(Some).collect(),
        }
    }
}

impl<T> FromIterator<T> for Store<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Store {
            slots: iter.into_iter().map(Some).collect(),
        }
    }
}

/// Validate a caller-supplied index, returning it as a 1-based `usize`.
pub(crate) fn check_index(index: Index, msg: &'static str) -> Result<usize, KernelError> {
    if index < 1 {
        return Err(KernelError::InvalidArgument(msg));
    }
    Ok(index as usize)
}

/// Direction of traversal of the inclusive range `a..b`: `1` if ascending,
/// `-1` if descending.
pub(crate) fn step(a: Index, b: Index) -> Index {
    if a <= b {
        1
    } else {
        -1
    }
}

/// Number of positions in the inclusive range `a..b`, in either direction.
pub(crate) fn range_len(a: Index, b: Index) -> usize {
    a.abs_diff(b) + 1
}

#[cfg(test)]
mod tests {
    use super::{range_len, step, Store};

    #[test]
    fn test_get_set() {
        let mut store = Store::from([1, 2, 3]);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(0), None);
        assert_eq!(store.get(1), Some(&1));
        assert_eq!(store.get(4), None);

        store.set(6, Some(6));
        assert_eq!(store.len(), 6);
        assert_eq!(store.get(5), None);

        store.set(6, None);
        assert_eq!(store.len(), 3);
    }

    #[test]
    #[should_panic(expected = "store indices start at 1")]
    fn test_set_zero() {
        let mut store = Store::<i32>::new();
        store.set(0, Some(1));
    }

    #[test]
    fn test_trailing_holes_are_trimmed() {
        let store = Store::from_slots(vec![Some(1), None, Some(3), None, None]);
        assert_eq!(store.len(), 3);
        assert_eq!(store, Store::from_slots(vec![Some(1), None, Some(3)]));
    }

    #[test]
    fn test_take_and_swap() {
        let mut store = Store::from([1, 2, 3]);
        assert_eq!(store.take(3), Some(3));
        assert_eq!(store.len(), 2);

        store.swap(1, 5);
        assert_eq!(store.to_slots(), [None, Some(2), None, None, Some(1)]);

        store.swap(5, 1);
        assert_eq!(store, Store::from([1, 2]));
    }

    #[test]
    fn test_step_and_range_len() {
        assert_eq!(step(1, 4), 1);
        assert_eq!(step(4, 1), -1);
        assert_eq!(step(2, 2), 1);
        assert_eq!(range_len(1, 4), 4);
        assert_eq!(range_len(4, 1), 4);
        assert_eq!(range_len(3, 3), 1);
    }
}
