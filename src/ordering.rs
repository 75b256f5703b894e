//! Comparator-driven sorting, merging and partitioning of store ranges.
//!
//! Comparators are "precedes" predicates: `precedes(a, b)` returns true if
//! `a` must come before `b`. They must be strict weak orderings. The plain
//! variants of each operation use the natural `<` order of the element type.
//!
//! Elements are moved, never cloned. Every slot of the range being ordered
//! must hold an element.

use crate::errors::KernelError;
use crate::store::{check_index, Index, Store};

/// Sort `store[first..=last]` in ascending natural order.
///
/// See [`insertion_sort_by`].
pub fn insertion_sort<T: PartialOrd>(
    store: &mut Store<T>,
    first: Index,
    last: Index,
) -> Result<(), KernelError> {
    insertion_sort_by(store, first, last, |a, b| a < b)
}

/// Stable insertion sort of `store[first..=last]` according to `precedes`.
///
/// Does nothing if `last <= first`.
pub fn insertion_sort_by<T, F>(
    store: &mut Store<T>,
    first: Index,
    last: Index,
    mut precedes: F,
) -> Result<(), KernelError>
where
    F: FnMut(&T, &T) -> bool,
{
    if last <= first {
        return Ok(());
    }
    let (lo, hi) = checked_run(store, first, last)?;

    with_run(store, lo, hi, |items| {
        for i in 1..items.len() {
            let mut j = i;
            while j > 0 && precedes(&items[i], &items[j - 1]) {
                j -= 1;
            }
            // Shift the predecessors which the held element precedes forward
            // one slot and drop it into the gap.
            items[j..=i].rotate_right(1);
        }
    });
    Ok(())
}

/// Merge the sorted runs `store[lo..=mid]` and `store[mid+1..=hi]` in
/// natural order.
///
/// See [`merge_by`].
pub fn merge<T: PartialOrd>(
    store: &mut Store<T>,
    lo: Index,
    mid: Index,
    hi: Index,
) -> Result<(), KernelError> {
    merge_by(store, lo, mid, hi, |a, b| a < b)
}

/// Merge the runs `store[lo..=mid]` and `store[mid+1..=hi]`, each already
/// sorted according to `precedes`, into one sorted run spanning `lo..=hi`.
///
/// The merge is stable: of two equivalent elements, the one from the left
/// run comes first. Only the left run is buffered. Does nothing if
/// `hi <= mid` or `mid <= lo`.
pub fn merge_by<T, F>(
    store: &mut Store<T>,
    lo: Index,
    mid: Index,
    hi: Index,
    mut precedes: F,
) -> Result<(), KernelError>
where
    F: FnMut(&T, &T) -> bool,
{
    if hi <= mid || mid <= lo {
        return Ok(());
    }
    let (lo, hi) = checked_run(store, lo, hi)?;
    let left_len = mid as usize - lo + 1;

    store.with_slots(lo, hi, |slots| {
        let left: Vec<T> = slots[..left_len]
            .iter_mut()
            .filter_map(|slot| slot.take())
            .collect();
        let mut left = left.into_iter().peekable();

        let mut out = 0;
        let mut right = left_len;
        while let Some(next_left) = left.peek() {
            let take_right = slots
                .get(right)
                .and_then(|slot| slot.as_ref())
                .is_some_and(|r| precedes(r, next_left));
            let next = if take_right {
                right += 1;
                slots[right - 1].take()
            } else {
                left.next()
            };
            slots[out] = next;
            out += 1;
        }
        // Whatever remains of the right run is already in place.
    });
    Ok(())
}

/// Three-way partition of `store[lo..=hi]` around `pivot` in natural order.
///
/// See [`trisect_by`].
pub fn trisect<T: PartialOrd>(
    store: &mut Store<T>,
    lo: Index,
    hi: Index,
    pivot: Option<&T>,
) -> Result<(Index, Index), KernelError> {
    trisect_impl(store, lo, hi, pivot, |a: &T, b: &T| a < b, None::<&mut Store<()>>)
}

/// Three-way ("Dutch national flag") partition of `store[lo..=hi]` around
/// `pivot`.
///
/// Afterwards elements which precede the pivot come first, then elements
/// equivalent to it, then elements which the pivot precedes. Returns
/// `(lt, gt)` where `lt` is the index of the last element preceding the
/// pivot and `gt` is the index of the first element the pivot precedes.
/// `lt` is `lo - 1` if there are no lesser elements and `gt` is `hi + 1` if
/// there are no greater elements.
///
/// Fails with [`KernelError::InvalidArgument`] if `pivot` is `None` or the
/// range has fewer than two elements, and with
/// [`KernelError::InvalidComparator`] if `precedes(pivot, pivot)` is true.
pub fn trisect_by<T, F>(
    store: &mut Store<T>,
    lo: Index,
    hi: Index,
    pivot: Option<&T>,
    precedes: F,
) -> Result<(Index, Index), KernelError>
where
    F: FnMut(&T, &T) -> bool,
{
    trisect_impl(store, lo, hi, pivot, precedes, None::<&mut Store<()>>)
}

/// Variant of [`trisect_by`] which applies every exchange made in `store`
/// to the same positions of `tags` as well.
///
/// Tags may be absent; holes are permuted like any other slot.
pub fn trisect_tagged_by<T, U, F>(
    store: &mut Store<T>,
    lo: Index,
    hi: Index,
    pivot: Option<&T>,
    precedes: F,
    tags: &mut Store<U>,
) -> Result<(Index, Index), KernelError>
where
    F: FnMut(&T, &T) -> bool,
{
    trisect_impl(store, lo, hi, pivot, precedes, Some(tags))
}

fn trisect_impl<T, U, F>(
    store: &mut Store<T>,
    lo: Index,
    hi: Index,
    pivot: Option<&T>,
    mut precedes: F,
    tags: Option<&mut Store<U>>,
) -> Result<(Index, Index), KernelError>
where
    F: FnMut(&T, &T) -> bool,
{
    let pivot = pivot.ok_or(KernelError::InvalidArgument("pivot value is required"))?;
    if hi <= lo {
        return Err(KernelError::InvalidArgument(
            "partition range must hold at least two elements",
        ));
    }
    let (lo_pos, hi_pos) = checked_run(store, lo, hi)?;
    if precedes(pivot, pivot) {
        return Err(KernelError::InvalidComparator);
    }

    let (lt, gt) = with_run(store, lo_pos, hi_pos, |items| match tags {
        Some(tags) => tags.with_slots(lo_pos, hi_pos, |tag_slots| {
            partition3(items, pivot, &mut precedes, |i, j| tag_slots.swap(i, j))
        }),
        None => partition3(items, pivot, &mut precedes, |_, _| {}),
    });

    Ok((lo + lt as Index - 1, lo + gt as Index))
}

/// Partition `slots` into less, equal and greater zones. Returns the start
/// of the equal zone and the start of the greater zone. `on_swap` is called
/// with the positions of every exchange.
fn partition3<T, F: FnMut(&T, &T) -> bool>(
    items: &mut [T],
    pivot: &T,
    precedes: &mut F,
    mut on_swap: impl FnMut(usize, usize),
) -> (usize, usize) {
    let mut lt = 0;
    let mut gt = items.len();
    let mut i = 0;

    while i < gt {
        if precedes(&items[i], pivot) {
            items.swap(lt, i);
            on_swap(lt, i);
            lt += 1;
            i += 1;
        } else if precedes(pivot, &items[i]) {
            gt -= 1;
            items.swap(i, gt);
            on_swap(i, gt);
        } else {
            i += 1;
        }
    }

    (lt, gt)
}

/// Move the elements of the range `lo..=hi`, already validated by
/// [`checked_run`], into a buffer, call `f` with them and move them back.
fn with_run<T, R>(
    store: &mut Store<T>,
    lo: usize,
    hi: usize,
    f: impl FnOnce(&mut [T]) -> R,
) -> R {
    store.with_slots(lo, hi, |slots| {
        let mut items: Vec<T> = slots.iter_mut().filter_map(Option::take).collect();
        let result = f(&mut items);
        for (slot, item) in slots.iter_mut().zip(items) {
            *slot = Some(item);
        }
        result
    })
}

/// Validate the bounds of a non-empty range to be ordered and check that
/// it has no holes.
fn checked_run<T>(
    store: &Store<T>,
    lo: Index,
    hi: Index,
) -> Result<(usize, usize), KernelError> {
    let lo = check_index(lo, "range start must be positive")?;
    let hi = check_index(hi, "range end must be positive")?;
    if !store.all_present(lo, hi) {
        return Err(KernelError::InvalidArgument(
            "range contains a missing value",
        ));
    }
    Ok((lo, hi))
}
