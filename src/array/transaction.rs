//! [`Transaction`]: build into a fresh block, then swap it in

use super::storage::{self, Buffer};
use crate::error::Error;
use crate::fat::*;

use core::mem::ManuallyDrop;
use core::ptr::NonNull;



/// Owns a freshly allocated block until [`commit`](Self::commit)ted.  Dropping an uncommitted transaction frees the block.
///
/// The transaction tracks memory only: whoever constructs elements into [`slot`](Self::slot)s must destroy them again
/// before letting an uncommitted transaction drop.
pub(super) struct Transaction<'a, T, A: Free> {
    allocator:  &'a A,
    data:       NonNull<T>,
    cap:        usize,
}

impl<'a, T, A: Alloc + Free> Transaction<'a, T, A> {
    /// Allocate room for exactly `cap` elements.  Fails with a size limit error before asking `allocator` if `cap` is too large.
    pub(super) fn begin(allocator: &'a A, cap: usize) -> Result<Self, Error> {
        let data = storage::allocate(allocator, cap)?;
        Ok(Self { allocator, data, cap })
    }
}

impl<'a, T, A: Free> Transaction<'a, T, A> {
    #[inline(always)] pub(super) fn slot(&self, i: usize) -> *mut T {
        debug_assert!(i <= self.cap);
        self.data.as_ptr().wrapping_add(i)
    }

    /// Swap the new block into `buf` with `len` live elements and free the old block.
    ///
    /// ### Safety
    /// *   `self.slot(0..len)` must be initialized
    /// *   every element of `buf` must already have been moved out or destroyed
    pub(super) unsafe fn commit(self, buf: &mut Buffer<T>, len: usize) {
        debug_assert!(len <= self.cap);
        let this = ManuallyDrop::new(self);
        // SAFETY: ✔️ `data[..cap]` was allocated by `allocator`, `data[..len]` initialized per fn preconditions
        let new = unsafe { Buffer::from_raw_parts(this.data, len, this.cap) };
        let old = core::mem::replace(buf, new);
        // SAFETY: ✔️ `old` belonged to the same allocator, and its elements are gone per fn preconditions
        unsafe { storage::deallocate(this.allocator, old.data, old.cap) };
    }
}

impl<T, A: Free> Drop for Transaction<'_, T, A> {
    fn drop(&mut self) {
        // SAFETY: ✔️ uncommitted: the block is still ours alone
        unsafe { storage::deallocate(self.allocator, self.data, self.cap) }
    }
}



#[test] fn uncommitted_block_is_freed() {
    use crate::allocator::debug::FaultInjector;
    let fi = FaultInjector::new();
    let a = &fi;
    {
        let tx = Transaction::<u32, _>::begin(&a, 16).unwrap();
        unsafe { tx.slot(3).write(42) };
        assert_eq!(fi.outstanding(), 1);
    }
    assert_eq!(fi.outstanding(), 0);
}

#[test] fn commit_frees_old_block() {
    use crate::allocator::debug::FaultInjector;
    let fi = FaultInjector::new();
    let a = &fi;
    let mut buf = Buffer::<u32>::empty();

    let tx = Transaction::<u32, _>::begin(&a, 2).unwrap();
    unsafe { tx.slot(0).write(1) };
    unsafe { tx.commit(&mut buf, 1) };
    assert_eq!((buf.live(), buf.cap), (&[1][..], 2));

    let tx = Transaction::<u32, _>::begin(&a, 4).unwrap();
    unsafe { core::ptr::copy_nonoverlapping(buf.slot(0), tx.slot(0), 1) };
    unsafe { tx.slot(1).write(2) };
    buf.len = 0;
    unsafe { tx.commit(&mut buf, 2) };
    assert_eq!((buf.live(), buf.cap), (&[1, 2][..], 4));
    assert_eq!((fi.allocations(), fi.outstanding()), (2, 1));

    unsafe { buf.release(&a) };
    assert_eq!(fi.outstanding(), 0);
}
