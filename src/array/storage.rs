//! [`Buffer`]: the raw block behind a [`DArray`](super::DArray)

use crate::error::*;
use crate::fat::*;
use crate::meta::*;

use core::alloc::Layout;
use core::marker::PhantomData;
use core::mem::{align_of, size_of};
use core::ptr::NonNull;



/// `data[..len]` is live, `data[len..cap]` is uninitialized.  `cap == 0` means `data` dangles and owns nothing.
pub(super) struct Buffer<T> {
    pub(super) data:    NonNull<T>,
    pub(super) len:     usize,
    pub(super) cap:     usize,
    _owns:              PhantomData<T>,
}

impl<T> Buffer<T> {
    pub(super) const fn empty() -> Self { Self { data: NonNull::dangling(), len: 0, cap: 0, _owns: PhantomData } }

    /// ### Safety
    /// *   `data[..cap]` must have been allocated for `T`s by the allocator this buffer will be [`release`](Self::release)d with
    /// *   `data[..len]` must be initialized
    pub(super) const unsafe fn from_raw_parts(data: NonNull<T>, len: usize, cap: usize) -> Self { Self { data, len, cap, _owns: PhantomData } }

    /// Pointer to slot `i`.  Valid for `i <= cap`.
    #[inline(always)] pub(super) fn slot(&self, i: usize) -> *mut T {
        debug_assert!(i <= self.cap || size_of::<T>() == 0);
        self.data.as_ptr().wrapping_add(i)
    }

    #[inline(always)] pub(super) fn live(&self) -> &[T] {
        // SAFETY: ✔️ `data[..len]` is initialized per struct invariant
        unsafe { core::slice::from_raw_parts(self.data.as_ptr(), self.len) }
    }

    #[inline(always)] pub(super) fn live_mut(&mut self) -> &mut [T] {
        // SAFETY: ✔️ `data[..len]` is initialized per struct invariant
        unsafe { core::slice::from_raw_parts_mut(self.data.as_ptr(), self.len) }
    }

    /// Destroy `[len, self.len)` in reverse.  No-op if `len >= self.len`.
    pub(super) fn truncate(&mut self, len: usize) {
        let Some(n) = self.len.checked_sub(len) else { return };
        self.len = len;
        // SAFETY: ✔️ `[len, len+n)` was live and is no longer counted
        unsafe { super::construct::destroy_run(self.slot(len), n) };
    }

    /// Destroy every element, then free the block.  Leaves `self` [`empty`](Self::empty).
    ///
    /// ### Safety
    /// *   `self` must have been allocated by `allocator` (or be empty)
    pub(super) unsafe fn release<A: Free>(&mut self, allocator: &A) {
        self.truncate(0);
        let data = core::mem::replace(&mut self.data, NonNull::dangling());
        let cap  = core::mem::replace(&mut self.cap, 0);
        // SAFETY: ✔️ `data` / `cap` were allocated by `allocator` per fn preconditions
        unsafe { deallocate(allocator, data, cap) };
    }
}

/// Maximum number of `T`s a single `A` allocation can hold.
pub(super) const fn max_len<T, A: Meta>() -> usize {
    let size = size_of::<T>();
    if size == 0 { return usize::MAX }
    let bytes = if A::MAX_SIZE < isize::MAX as usize { A::MAX_SIZE } else { isize::MAX as usize };
    bytes / size
}

struct Check<T, A>(PhantomData<(T, A)>);
impl<T, A: Meta> Check<T, A> {
    /// If you hit this assertion, `A` cannot allocate memory sufficiently aligned for `T`.
    const ASSERT_A_CAN_ALLOC_T : () = assert!(align_of::<T>() <= A::MAX_ALIGN.as_usize(), "Alignment::of::<T>() > A::MAX_ALIGN - the allocator cannot allocate memory sufficiently aligned for instances of T");
}

fn layout<T, A: Meta>(cap: usize) -> Result<Layout, Error> {
    let max = max_len::<T, A>();
    if cap > max { return Err(ExcessiveSliceRequestedError { requested: cap, max }.into()) }
    Layout::array::<T>(cap).map_err(|_| ExcessiveSliceRequestedError { requested: cap, max }.into())
}

/// Allocate uninitialized room for `cap` `T`s.  Zero sized blocks dangle without consulting `allocator`.
pub(super) fn allocate<T, A: Alloc>(allocator: &A, cap: usize) -> Result<NonNull<T>, Error> {
    let _ = Check::<T, A>::ASSERT_A_CAN_ALLOC_T;
    let layout = layout::<T, A>(cap)?;
    if layout.size() == 0 { return Ok(NonNull::dangling()) }
    let data = allocator.alloc_uninit(layout).map_err(|_| OutOfMemoryError { requested: layout })?;
    Ok(data.cast())
}

/// Allocate room for `cap` `T`s with every byte zeroed.  Zero sized blocks dangle without consulting `allocator`.
pub(super) fn allocate_zeroed<T, A: Alloc>(allocator: &A, cap: usize) -> Result<NonNull<T>, Error> {
    let _ = Check::<T, A>::ASSERT_A_CAN_ALLOC_T;
    let layout = layout::<T, A>(cap)?;
    if layout.size() == 0 { return Ok(NonNull::dangling()) }
    let data = allocator.alloc_zeroed(layout).map_err(|_| OutOfMemoryError { requested: layout })?;
    Ok(data.cast())
}

/// Free a block obtained from [`allocate`] / [`allocate_zeroed`].  Zero sized blocks are ignored.
///
/// ### Safety
/// *   `data` must have been allocated for `cap` `T`s by `allocator`
/// *   `data` must not be accessed afterwards
pub(super) unsafe fn deallocate<T, A: Free>(allocator: &A, data: NonNull<T>, cap: usize) {
    let size = size_of::<T>() * cap;
    if size == 0 { return }
    // SAFETY: ✔️ the same layout was validated by `layout` when `data` was allocated
    let layout = unsafe { Layout::from_size_align_unchecked(size, align_of::<T>()) };
    // SAFETY: ✔️ `data` belongs to `allocator` with `layout` per fn preconditions
    unsafe { allocator.free(data.cast(), layout) };
}



#[test] fn max_len_limits() {
    use crate::allocator::alloc::Global;
    assert_eq!(max_len::<u8,        Global>(), usize::MAX/2);
    assert_eq!(max_len::<u32,       Global>(), usize::MAX/2/4);
    assert_eq!(max_len::<(),        Global>(), usize::MAX);
    assert_eq!(max_len::<[u8; 3],   Global>(), usize::MAX/2/3);
}

#[test] fn size_limit_before_allocating() {
    use crate::allocator::debug::FaultInjector;
    let fi = FaultInjector::new();
    let e = allocate::<u32, _>(&&fi, usize::MAX/4).unwrap_err();
    assert!(e.is_size_limit());
    assert_eq!(fi.allocations() + fi.refused(), 0);
}

#[test] fn zero_sized_blocks_dangle() {
    use crate::allocator::debug::Null;
    let data = allocate::<(), _>(&Null, 100).unwrap();
    assert_eq!(data, NonNull::dangling());
    let data = allocate::<u64, _>(&Null, 0).unwrap();
    unsafe { deallocate(&Null, data, 0) };
    assert!(allocate::<u64, _>(&Null, 1).unwrap_err().is_out_of_memory());
}
