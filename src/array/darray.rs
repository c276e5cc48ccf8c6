use super::construct::construct_with;
use super::growth::grown_capacity;
use super::shift::{self, Displaced, Gap};
use super::storage::{self, Buffer};
use super::transaction::Transaction;
use crate::bug;
use crate::error::*;
use crate::fat::*;
use crate::meta::*;

use bytemuck::Zeroable;

use core::mem::{ManuallyDrop, MaybeUninit};
use core::ops::{Bound, RangeBounds};
use core::ptr::{self, NonNull};



/// [`fat::Alloc`]-aware growable array.
///
/// Slots `[0, len)` hold live elements, `[len, capacity)` are uninitialized, and a capacity of `0` means no block is
/// held at all.  Every fallible operation either succeeds completely or leaves the array exactly as it was: out of
/// memory, size limits, and element constructors that fail (by [`Err`] or by panicking) all roll back.
///
/// | Operation family                  | Failure reported as |
/// | ----------------------------------| --------------------|
/// | allocation (`try_*`)              | [`Error::OutOfMemory`] / [`Error::ExcessiveSliceRequested`]
/// | checked access ([`at`](Self::at))  | [`OutOfBoundsError`]
/// | user constructors (`try_*_fn*`, `try_emplace*`) | the constructor's own `E: From<Error>`
/// | [`shrink_to_fit`](Self::shrink_to_fit) | nothing: the block is kept as is
///
/// ```
/// # use darray::GlobalArray;
/// let mut a = GlobalArray::try_from_slice_in(&[1, 2, 3, 4, 5], Default::default()).unwrap();
/// a.try_insert_from_within(0, 4).unwrap(); // source relocated by the shift
/// assert_eq!(a, [5, 1, 2, 3, 4, 5]);
/// a.erase_range(..3);
/// assert_eq!(a, [3, 4, 5]);
/// ```
pub struct DArray<T, A: Free> {
    buf:        Buffer<T>,
    allocator:  A,
}

impl<T, A: Free> Drop for DArray<T, A> {
    fn drop(&mut self) {
        // SAFETY: ✔️ `buf` was allocated by `allocator`
        unsafe { self.buf.release(&self.allocator) }
    }
}

// SAFETY: ✔️ `DArray` owns its elements like `alloc::vec::Vec` does
unsafe impl<T: Send, A: Free + Send> Send for DArray<T, A> {}
// SAFETY: ✔️ `DArray` owns its elements like `alloc::vec::Vec` does
unsafe impl<T: Sync, A: Free + Sync> Sync for DArray<T, A> {}



impl<T, A: Free> DArray<T, A> {
    #[inline(always)] pub fn allocator(&self) -> &A { &self.allocator }
    #[inline(always)] pub fn as_ptr(&self) -> *const T { self.buf.data.as_ptr() }
    #[inline(always)] pub fn as_mut_ptr(&mut self) -> *mut T { self.buf.data.as_ptr() }
    #[inline(always)] pub fn as_slice(&self) -> &[T] { self.buf.live() }
    #[inline(always)] pub fn as_slice_mut(&mut self) -> &mut [T] { self.buf.live_mut() }
    #[inline(always)] pub fn capacity(&self) -> usize { self.buf.cap }
    #[inline(always)] pub fn is_empty(&self) -> bool { self.len() == 0 }
    #[inline(always)] pub fn len(&self) -> usize { self.buf.len }

    /// The most elements a single allocation of `A` can hold (<code>[usize::MAX]</code> for zero sized `T`).
    #[inline(always)] pub fn max_len(&self) -> usize { storage::max_len::<T, A>() }

    /// ### Safety
    /// *   `len <= capacity()`
    /// *   `[0, len)` must be initialized
    #[inline(always)] pub unsafe fn set_len(&mut self, len: usize) { debug_assert!(len <= self.buf.cap); self.buf.len = len; }

    pub fn spare_capacity_mut(&mut self) -> &mut [MaybeUninit<T>] {
        let spare = self.buf.cap - self.buf.len;
        // SAFETY: ✔️ `[len, cap)` is allocated and holds nothing live
        unsafe { core::slice::from_raw_parts_mut(self.buf.slot(self.buf.len).cast(), spare) }
    }

    /// Empty array without a block.  Never allocates.
    pub const fn new_in(allocator: A) -> Self { Self { buf: Buffer::empty(), allocator } }
    pub fn new() -> Self where A : Default { Self::new_in(A::default()) }

    /// ### Safety
    /// *   `data` must have been allocated by `allocator` as exactly `capacity` `T`s (or dangle if that's zero bytes)
    /// *   `[0, len)` must be initialized, `len <= capacity`
    pub unsafe fn from_raw_parts_in(data: NonNull<T>, len: usize, capacity: usize, allocator: A) -> Self {
        debug_assert!(len <= capacity);
        // SAFETY: ✔️ per fn preconditions
        Self { buf: unsafe { Buffer::from_raw_parts(data, len, capacity) }, allocator }
    }

    /// ### Safety
    /// *   As [`from_raw_parts_in`](Self::from_raw_parts_in), with any instance of the [`Stateless`] `A`
    pub unsafe fn from_raw_parts(data: NonNull<T>, len: usize, capacity: usize) -> Self where A : Stateless {
        // SAFETY: ✔️ any `A` can free what another `A` allocated per `Stateless`
        unsafe { Self::from_raw_parts_in(data, len, capacity, A::default()) }
    }

    /// Decompose into `(data, len, capacity, allocator)` without dropping anything.
    pub fn into_raw_parts_with_allocator(self) -> (NonNull<T>, usize, usize, A) {
        let this = ManuallyDrop::new(self);
        // SAFETY: ✔️ `this` is never dropped, so `allocator` is read exactly once
        let allocator = unsafe { ptr::read(&this.allocator) };
        (this.buf.data, this.buf.len, this.buf.cap, allocator)
    }

    /// Checked access.
    pub fn at(&self, index: usize) -> Result<&T, OutOfBoundsError> {
        let len = self.len();
        self.as_slice().get(index).ok_or(OutOfBoundsError { index, len })
    }

    /// Checked mutable access.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, OutOfBoundsError> {
        let len = self.len();
        self.as_slice_mut().get_mut(index).ok_or(OutOfBoundsError { index, len })
    }

    #[track_caller] pub fn front    (&self)     -> &T       { let Some(v) = self.as_slice().first()         else { empty("front")     }; v }
    #[track_caller] pub fn back     (&self)     -> &T       { let Some(v) = self.as_slice().last()          else { empty("back")      }; v }
    #[track_caller] pub fn front_mut(&mut self) -> &mut T   { let Some(v) = self.as_slice_mut().first_mut() else { empty("front_mut") }; v }
    #[track_caller] pub fn back_mut (&mut self) -> &mut T   { let Some(v) = self.as_slice_mut().last_mut()  else { empty("back_mut")  }; v }

    /// Destroy every element (last first).  Capacity is kept.
    pub fn clear(&mut self) { self.buf.truncate(0) }

    /// Destroy `[len, self.len())` (last first).  Capacity is kept.
    pub fn truncate(&mut self, len: usize) { self.buf.truncate(len) }

    pub fn pop(&mut self) -> Option<T> {
        let idx_to_pop = self.buf.len.checked_sub(1)?;
        self.buf.len = idx_to_pop;
        // SAFETY: ✔️ was live, no longer counted
        Some(unsafe { self.buf.slot(idx_to_pop).read() })
    }

    /// Destroy the element at `index` and close the hole.  Panics if `index >= len()`.
    #[track_caller] pub fn erase(&mut self, index: usize) {
        assert!(index < self.len(), "erase index (is {index}) should be < len (is {})", self.len());
        shift::erase(&mut self.buf, index, index + 1);
    }

    /// Destroy `range` (last first) and move the tail left over it.  Capacity is kept.  Panics if `range` isn't within `..len()`.
    #[track_caller] pub fn erase_range(&mut self, range: impl RangeBounds<usize>) {
        let (first, last) = match bounds(range, self.len()) {
            Ok(r)   => r,
            Err(e)  => panic!("erase range is out of bounds: {e}"),
        };
        shift::erase(&mut self.buf, first, last);
    }

    pub fn try_remove(&mut self, index: usize) -> Option<T> {
        let len = self.buf.len;
        if index >= len { return None }
        // SAFETY: ✔️ `index` is live
        let value = unsafe { self.buf.slot(index).read() };
        // SAFETY: ✔️ `[index+1, len)` is live, the moved out `index` slot is overwritten
        unsafe { ptr::copy(self.buf.slot(index + 1), self.buf.slot(index), len - index - 1) };
        self.buf.len = len - 1;
        Some(value)
    }

    #[cfg(feature = "panicy-bounds")] #[track_caller] pub fn remove(&mut self, index: usize) -> T {
        let len = self.len();
        let Some(value) = self.try_remove(index) else { panic!("removal index (is {index}) should be < len (is {len})") };
        value
    }

    /// Exchange contents and allocators.  Never fails, never allocates.
    pub fn swap_with(&mut self, other: &mut Self) { core::mem::swap(self, other) }

    /// Move everything out, leaving `self` empty with no block (`capacity() == 0`).
    pub fn take(&mut self) -> Self where A : Clone {
        let empty = Self::new_in(self.allocator.clone());
        core::mem::replace(self, empty)
    }

    /// Destroy `self`'s contents and take over `other`'s block, leaving `other` empty with no block.
    pub fn move_from(&mut self, other: &mut Self) where A : Clone { *self = other.take() }
}



impl<T, A: Alloc + Free> DArray<T, A> {
    pub fn try_with_len_in(len: usize, allocator: A) -> Result<Self, Error> where T : Default { Self::try_from_fn_in(len, |_| Ok(T::default()), allocator) }
    pub fn try_with_len   (len: usize) -> Result<Self, Error> where T : Default, A : Default { Self::try_with_len_in(len, A::default()) }
    #[cfg(feature = "panicy-memory")] pub fn with_len_in(len: usize, allocator: A) -> Self where T : Default { Self::try_with_len_in(len, allocator).expect("out of memory") }
    #[cfg(feature = "panicy-memory")] pub fn with_len   (len: usize) -> Self where T : Default, A : Default { Self::try_with_len(len).expect("out of memory") }

    /// `len` elements with every byte zero, from a single zeroed allocation and no per-element construction.
    pub fn try_zeroed_in(len: usize, allocator: A) -> Result<Self, Error> where T : Zeroable {
        let data = storage::allocate_zeroed::<T, A>(&allocator, len)?;
        // SAFETY: ✔️ just allocated by `allocator`, all-zero bytes are a valid `T` per `Zeroable`
        Ok(unsafe { Self::from_raw_parts_in(data, len, len, allocator) })
    }

    /// `len` clones of `value`.
    pub fn try_from_elem_in(value: &T, len: usize, allocator: A) -> Result<Self, Error> where T : Clone { Self::try_from_fn_in(len, |_| Ok(value.clone()), allocator) }
    #[cfg(feature = "panicy-memory")] pub fn from_elem_in(value: &T, len: usize, allocator: A) -> Self where T : Clone { Self::try_from_elem_in(value, len, allocator).expect("out of memory") }

    /// Clones of `slice`, with `capacity() == slice.len()`.
    pub fn try_from_slice_in(slice: &[T], allocator: A) -> Result<Self, Error> where T : Clone { Self::try_from_fn_in(slice.len(), |k| Ok(slice[k].clone()), allocator) }
    #[cfg(feature = "panicy-memory")] pub fn from_slice_in(slice: &[T], allocator: A) -> Self where T : Clone { Self::try_from_slice_in(slice, allocator).expect("out of memory") }

    /// Move `array`'s elements in.  On failure `array` is dropped.
    pub fn try_from_array_in<const N: usize>(array: [T; N], allocator: A) -> Result<Self, Error> {
        let data = storage::allocate::<T, A>(&allocator, N)?;
        let array = ManuallyDrop::new(array);
        // SAFETY: ✔️ `data` has room for `N`, `array` is never dropped so each element moves exactly once
        unsafe { ptr::copy_nonoverlapping(array.as_ptr(), data.as_ptr(), N) };
        // SAFETY: ✔️ just allocated by `allocator` and initialized
        Ok(unsafe { Self::from_raw_parts_in(data, N, N, allocator) })
    }

    /// `len` elements, the `k`th constructed by `f(k)`.  Any failure destroys what was built so far and frees the block.
    pub fn try_from_fn_in<E: From<Error>>(len: usize, f: impl FnMut(usize) -> Result<T, E>, allocator: A) -> Result<Self, E> {
        let mut a = Self::new_in(allocator);
        a.try_rebuild(len, f)?;
        Ok(a)
    }

    pub fn try_clone(&self) -> Result<Self, Error> where T : Clone, A : Clone { Self::try_from_slice_in(self, self.allocator.clone()) }
    pub fn try_clone_in<A2: Alloc + Free>(&self, allocator: A2) -> Result<DArray<T, A2>, Error> where T : Clone { DArray::try_from_slice_in(self, allocator) }



    /// Replace the contents with clones of `other`'s.  On failure `self` is untouched.
    pub fn try_assign_from(&mut self, other: &DArray<T, impl Free>) -> Result<(), Error> where T : Clone { self.try_assign_slice(other) }

    /// Replace the contents with clones of `slice`.  Assigning nothing only [`clear`](Self::clear)s, anything else builds a
    /// fresh block of exactly `slice.len()`.  On failure `self` is untouched.
    pub fn try_assign_slice(&mut self, slice: &[T]) -> Result<(), Error> where T : Clone { self.try_rebuild(slice.len(), |k| Ok(slice[k].clone())) }

    /// Replace the contents with `len` clones of `value`.  On failure `self` is untouched.
    pub fn try_assign_elem(&mut self, value: &T, len: usize) -> Result<(), Error> where T : Clone { self.try_rebuild(len, |_| Ok(value.clone())) }

    /// Replace the contents with `len` elements built by `f(k)`.  On failure `self` is untouched.
    pub fn try_assign_with<E: From<Error>>(&mut self, len: usize, f: impl FnMut(usize) -> Result<T, E>) -> Result<(), E> { self.try_rebuild(len, f) }



    /// Ensure `capacity() >= capacity`, reallocating to exactly `capacity` if needed.  On failure `self` is untouched.
    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), Error> {
        if capacity <= self.buf.cap { return Ok(()) }
        self.try_relocate(capacity)
    }

    #[cfg(feature = "panicy-memory")] pub fn reserve(&mut self, capacity: usize) { self.try_reserve(capacity).expect("unable to reserve more memory") }

    /// Make room for `additional` more elements, growing the way insertions do.  On failure `self` is untouched.
    pub(super) fn try_reserve_amortized(&mut self, additional: usize) -> Result<(), Error> {
        let max = storage::max_len::<T, A>();
        let required = self.buf.len.checked_add(additional).ok_or(ExcessiveSliceRequestedError { requested: usize::MAX, max })?;
        if required <= self.buf.cap { return Ok(()) }
        let cap = grown_capacity(self.buf.cap, required, max)?;
        self.try_relocate(cap)
    }

    /// Reallocate to exactly `len()` slots (releasing the block entirely when empty).
    ///
    /// Best effort: if the smaller block can't be allocated, the current one is kept and nothing is reported.
    pub fn shrink_to_fit(&mut self) {
        let len = self.buf.len;
        if len == self.buf.cap { return }
        if len == 0 {
            // SAFETY: ✔️ `buf` was allocated by `allocator`
            unsafe { self.buf.release(&self.allocator) };
            return;
        }
        let _ = self.try_relocate(len);
    }



    /// Append `value`, or hand it back on failure.
    pub fn try_push(&mut self, value: T) -> Result<(), (T, Error)> { let len = self.len(); self.try_insert(len, value) }
    #[cfg(feature = "panicy-memory")] pub fn push(&mut self, value: T) { self.try_push(value).map_err(|(_, e)| e).expect("out of memory") }

    /// Insert `value` before `index`, or hand it back on failure.  Panics if `index > len()`.
    #[track_caller] pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), (T, Error)> {
        let mut value = Some(value);
        match self.try_insert_run::<Error>(index, 1, |_, _| Ok(value.take().unwrap_or_else(|| bug::invariant::emplace_called_twice()))) {
            Ok(()) => Ok(()),
            Err(e) => match value.take() {
                Some(value) => Err((value, e)),
                None        => bug::invariant::insert_failed_after_consuming_value(),
            },
        }
    }

    #[cfg(feature = "panicy-memory")] #[track_caller] pub fn insert(&mut self, index: usize, value: T) { self.try_insert(index, value).map_err(|(_, e)| e).expect("out of memory") }

    pub fn try_push_clone(&mut self, value: &T) -> Result<(), Error> where T : Clone { let len = self.len(); self.try_insert_n(len, value, 1) }
    #[track_caller] pub fn try_insert_clone(&mut self, index: usize, value: &T) -> Result<(), Error> where T : Clone { self.try_insert_n(index, value, 1) }

    /// Insert `n` clones of `value` before `index`.  Panics if `index > len()`.
    #[track_caller] pub fn try_insert_n(&mut self, index: usize, value: &T, n: usize) -> Result<(), Error> where T : Clone {
        self.try_insert_run(index, n, |_, _| Ok(value.clone()))
    }

    #[cfg(feature = "panicy-memory")] #[track_caller] pub fn insert_n(&mut self, index: usize, value: &T, n: usize) where T : Clone { self.try_insert_n(index, value, n).expect("out of memory") }

    /// Insert clones of `slice` before `index`.  Panics if `index > len()`.
    #[track_caller] pub fn try_insert_slice(&mut self, index: usize, slice: &[T]) -> Result<(), Error> where T : Clone {
        self.try_insert_run(index, slice.len(), |_, k| Ok(slice[k].clone()))
    }

    #[cfg(feature = "panicy-memory")] #[track_caller] pub fn insert_slice(&mut self, index: usize, slice: &[T]) where T : Clone { self.try_insert_slice(index, slice).expect("out of memory") }

    pub fn try_extend_from_slice(&mut self, slice: &[T]) -> Result<(), Error> where T : Clone { let len = self.len(); self.try_insert_slice(len, slice) }
    #[cfg(feature = "panicy-memory")] pub fn extend_from_slice(&mut self, slice: &[T]) where T : Clone { self.try_extend_from_slice(slice).expect("out of memory") }

    /// Insert a clone of `self[src]` before `index`.  `src` names the element *before* the insertion shifts anything.
    #[track_caller] pub fn try_insert_from_within(&mut self, index: usize, src: usize) -> Result<(), Error> where T : Clone { self.try_insert_n_from_within(index, src, 1) }

    /// Insert `n` clones of `self[src]` before `index`.  `src` names the element *before* the insertion shifts anything.
    #[track_caller] pub fn try_insert_n_from_within(&mut self, index: usize, src: usize, n: usize) -> Result<(), Error> where T : Clone {
        let len = self.len();
        if src >= len { return Err(OutOfBoundsError { index: src, len }.into()) }
        self.try_insert_run(index, n, |d, _| Ok(d.get(src).clone()))
    }

    /// Insert clones of `self[range]` before `index`.  `range` may straddle `index`: every element is read from wherever
    /// the shift moved it.
    #[track_caller] pub fn try_insert_range_from_within(&mut self, index: usize, range: impl RangeBounds<usize>) -> Result<(), Error> where T : Clone {
        let (start, end) = bounds(range, self.len())?;
        self.try_insert_run(index, end - start, |d, k| Ok(d.get(start + k).clone()))
    }

    pub fn try_extend_from_within(&mut self, range: impl RangeBounds<usize>) -> Result<(), Error> where T : Clone { let len = self.len(); self.try_insert_range_from_within(len, range) }
    #[cfg(feature = "panicy-memory")] pub fn extend_from_within(&mut self, range: impl RangeBounds<usize>) where T : Clone { self.try_extend_from_within(range).expect("unable to extend") }

    /// Construct an element in place before `index` from `f()`.  Panics if `index > len()`.
    #[track_caller] pub fn try_emplace<E: From<Error>>(&mut self, index: usize, f: impl FnOnce() -> Result<T, E>) -> Result<&mut T, E> {
        let mut f = Some(f);
        self.try_insert_run(index, 1, |_, _| match f.take() {
            Some(f) => f(),
            None    => bug::invariant::emplace_called_twice(),
        })?;
        Ok(&mut self.as_slice_mut()[index])
    }

    #[track_caller] pub fn try_emplace_with(&mut self, index: usize, f: impl FnOnce() -> T) -> Result<&mut T, Error> { self.try_emplace(index, || Ok(f())) }
    pub fn try_emplace_back<E: From<Error>>(&mut self, f: impl FnOnce() -> Result<T, E>) -> Result<&mut T, E> { let len = self.len(); self.try_emplace(len, f) }



    /// Insert `n` elements before `index`, the `k`th built by `f(view, k)`, where `view` reads the array's elements by
    /// their pre-insertion indices.
    ///
    /// *   Enough spare capacity, `index == len`: construct straight into the spare slots.
    /// *   Enough spare capacity otherwise: move the tail right by `n`, construct into the gap, move the tail back on failure.
    /// *   Not enough capacity: construct the new elements into a fresh grown block first, then move the prefix and tail over.
    #[track_caller] fn try_insert_run<E: From<Error>>(&mut self, index: usize, n: usize, mut f: impl FnMut(&Displaced<T>, usize) -> Result<T, E>) -> Result<(), E> {
        let len = self.buf.len;
        assert!(index <= len, "insertion index (is {index}) should be <= len (is {len})");
        if n == 0 { return Ok(()) }

        let max = storage::max_len::<T, A>();
        let required = len.checked_add(n).ok_or(Error::from(ExcessiveSliceRequestedError { requested: usize::MAX, max }))?;

        if required > self.buf.cap {
            let cap = grown_capacity(self.buf.cap, required, max).map_err(Error::from)?;
            let tx = Transaction::begin(&self.allocator, cap)?;
            let src = Displaced::of(&self.buf);
            // SAFETY: ✔️ `[index, index+n)` of the fresh block is in bounds and empty
            unsafe { construct_with(tx.slot(index), n, |k| f(&src, k)) }?;
            // SAFETY: ✔️ moves `[0, len)` around the new run; the old block keeps no live elements afterwards
            unsafe {
                ptr::copy_nonoverlapping(self.buf.slot(0),     tx.slot(0),         index);
                ptr::copy_nonoverlapping(self.buf.slot(index), tx.slot(index + n), len - index);
            }
            self.buf.len = 0;
            // SAFETY: ✔️ `[0, required)` of the new block is initialized, the old block's elements were moved out
            unsafe { tx.commit(&mut self.buf, required) };
        } else if index == len {
            let src = Displaced::of(&self.buf);
            // SAFETY: ✔️ `[len, required)` is spare capacity
            unsafe { construct_with(self.buf.slot(len), n, |k| f(&src, k)) }?;
            self.buf.len = required;
        } else {
            let gap = Gap::open(&mut self.buf, index, n);
            let src = gap.displaced();
            // SAFETY: ✔️ the gap is `n` empty slots
            unsafe { construct_with(gap.start(), n, |k| f(&src, k)) }?;
            // SAFETY: ✔️ all `n` gap slots were just constructed
            unsafe { gap.fill() };
        }
        Ok(())
    }

    /// Replace the contents with `n` elements built into a fresh block of exactly `n`.  `n == 0` only clears.
    fn try_rebuild<E: From<Error>>(&mut self, n: usize, f: impl FnMut(usize) -> Result<T, E>) -> Result<(), E> {
        if n == 0 { self.clear(); return Ok(()) }
        let tx = Transaction::begin(&self.allocator, n)?;
        // SAFETY: ✔️ the fresh block has room for `n`
        unsafe { construct_with(tx.slot(0), n, f) }?;
        self.buf.truncate(0);
        // SAFETY: ✔️ `[0, n)` constructed, the old elements were just destroyed
        unsafe { tx.commit(&mut self.buf, n) };
        Ok(())
    }

    /// Move every element into a fresh block of exactly `cap >= len()` slots.
    fn try_relocate(&mut self, cap: usize) -> Result<(), Error> {
        let len = self.buf.len;
        debug_assert!(cap >= len);
        let tx = Transaction::begin(&self.allocator, cap)?;
        // SAFETY: ✔️ `[0, len)` is live and fits in the new block
        unsafe { ptr::copy_nonoverlapping(self.buf.slot(0), tx.slot(0), len) };
        self.buf.len = 0;
        // SAFETY: ✔️ `[0, len)` of the new block is initialized, the old block's elements were moved out
        unsafe { tx.commit(&mut self.buf, len) };
        Ok(())
    }
}



/// Resolve `range` against `len`.
fn bounds(range: impl RangeBounds<usize>, len: usize) -> Result<(usize, usize), OutOfBoundsError> {
    let start = match range.start_bound() {
        Bound::Unbounded    => 0,
        Bound::Included(&i) => i,
        Bound::Excluded(&i) => i.checked_add(1).ok_or(OutOfBoundsError { index: i, len })?,
    };
    let end = match range.end_bound() {
        Bound::Unbounded    => len,
        Bound::Included(&i) => i.checked_add(1).ok_or(OutOfBoundsError { index: i, len })?,
        Bound::Excluded(&i) => i,
    };
    if end > len        { return Err(OutOfBoundsError { index: end, len }) }
    if start > end      { return Err(OutOfBoundsError { index: start, len }) }
    Ok((start, end))
}

#[track_caller] #[cold] fn empty(what: &str) -> ! { panic!("{what}() called on an empty DArray") }



#[test] fn bounds_resolution() {
    assert_eq!(bounds(.., 5), Ok((0, 5)));
    assert_eq!(bounds(1..=2, 5), Ok((1, 3)));
    assert_eq!(bounds(..5, 5), Ok((0, 5)));
    assert_eq!(bounds(..6, 5), Err(OutOfBoundsError { index: 6, len: 5 }));
    assert_eq!(bounds((Bound::Excluded(3), Bound::Excluded(3)), 5), Err(OutOfBoundsError { index: 4, len: 5 }));
    assert_eq!(bounds(..=usize::MAX, 5), Err(OutOfBoundsError { index: usize::MAX, len: 5 }));
}
