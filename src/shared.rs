//! Shared store handles for callers which may pass the same store as two
//! different arguments.
//!
//! Plain `&Store`/`&mut Store` borrows can never alias, so the functions in
//! [`range`](crate::range) and [`ordering`](crate::ordering) cannot be
//! called with the same store in two roles. An interpreter which holds
//! stores behind shared handles can, and the functions here check for that
//! before borrowing.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use crate::errors::KernelError;
use crate::ordering::{trisect_by, trisect_tagged_by};
use crate::range::transpose;
use crate::store::{Index, Store};

/// Reference-counted, interior-mutable handle to a [`Store`].
pub struct SharedStore<T> {
    inner: Rc<RefCell<Store<T>>>,
}

impl<T> Clone for SharedStore<T> {
    fn clone(&self) -> Self {
        SharedStore {
            inner: self.inner.clone(),
        }
    }
}

impl<T> SharedStore<T> {
    pub fn new(store: Store<T>) -> Self {
        SharedStore {
            inner: Rc::new(RefCell::new(store)),
        }
    }

    /// Return true if `self` and `other` are handles to the same store.
    pub fn same_store<U>(&self, other: &SharedStore<U>) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.inner), Rc::as_ptr(&other.inner))
    }

    pub fn borrow(&self) -> Ref<'_, Store<T>> {
        self.inner.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Store<T>> {
        self.inner.borrow_mut()
    }

    fn try_borrow(&self) -> Result<Ref<'_, Store<T>>, KernelError> {
        self.inner
            .try_borrow()
            .map_err(|_| KernelError::InvalidArgument("store is already borrowed"))
    }

    fn try_borrow_mut(&self) -> Result<RefMut<'_, Store<T>>, KernelError> {
        self.inner
            .try_borrow_mut()
            .map_err(|_| KernelError::InvalidArgument("store is already borrowed"))
    }
}

impl<T> From<Store<T>> for SharedStore<T> {
    fn from(store: Store<T>) -> Self {
        SharedStore::new(store)
    }
}

/// Variant of [`transpose`] for shared handles. Fails with
/// [`KernelError::InvalidArgument`] if `src` and `dest` are the same store.
pub fn transpose_shared<T: Clone>(
    src: &SharedStore<T>,
    m: Index,
    n: Index,
    dest: &SharedStore<T>,
) -> Result<(), KernelError> {
    if src.same_store(dest) {
        return Err(KernelError::InvalidArgument(
            "in-place transposition unsupported",
        ));
    }
    let src = src.try_borrow()?;
    let mut dest = dest.try_borrow_mut()?;
    transpose(&src, m, n, &mut dest)?;
    Ok(())
}

/// Variant of [`trisect_by`] and [`trisect_tagged_by`] for shared handles.
/// Fails with [`KernelError::InvalidArgument`] if `tags` is the store being
/// partitioned.
pub fn trisect_shared<T, U, F>(
    store: &SharedStore<T>,
    lo: Index,
    hi: Index,
    pivot: Option<&T>,
    precedes: F,
    tags: Option<&SharedStore<U>>,
) -> Result<(Index, Index), KernelError>
where
    F: FnMut(&T, &T) -> bool,
{
    if tags.is_some_and(|tags| tags.same_store(store)) {
        return Err(KernelError::InvalidArgument(
            "tag store must be distinct from the partitioned store",
        ));
    }
    let mut store_ref = store.try_borrow_mut()?;
    match tags {
        Some(tags) => {
            let mut tags = tags.try_borrow_mut()?;
            trisect_tagged_by(&mut store_ref, lo, hi, pivot, precedes, &mut tags)
        }
        None => trisect_by(&mut store_ref, lo, hi, pivot, precedes),
    }
}
