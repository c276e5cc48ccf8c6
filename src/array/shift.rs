//! Opening and closing gaps inside a [`Buffer`]

use super::construct::destroy_run;
use super::storage::Buffer;

use core::mem::ManuallyDrop;
use core::ptr::{self, NonNull};



/// Read-only view of the live elements while some of them are displaced: logical index `i` lives in slot `i` below
/// `at`, and in slot `i + shift` from `at` on.
///
/// Lets an insertion read its source out of the very buffer it is shifting.
pub(super) struct Displaced<T> {
    data:   NonNull<T>,
    at:     usize,
    shift:  usize,
    len:    usize,
}

impl<T> Displaced<T> {
    /// View of an undisturbed buffer.
    pub(super) fn of(buf: &Buffer<T>) -> Self { Self { data: buf.data, at: buf.len, shift: 0, len: buf.len } }

    /// Element at logical index `i`, wherever it currently lives.
    #[track_caller] pub(super) fn get(&self, i: usize) -> &T {
        assert!(i < self.len, "displaced index (is {i}) should be < len (is {})", self.len);
        let slot = if i < self.at { i } else { i + self.shift };
        // SAFETY: ✔️ `of` and `Gap::displaced` only describe initialized slots
        unsafe { &*self.data.as_ptr().add(slot) }
    }
}

/// An uninitialized gap of `n` slots at `at`, opened by moving the tail `[at, len)` right by `n`.
///
/// While open, `buf.len` only counts the untouched prefix.  Dropping the gap without [`fill`](Self::fill)ing it moves
/// the tail back and restores `buf.len`, so a failed insertion leaves the buffer as it found it.
pub(super) struct Gap<'a, T> {
    buf:    &'a mut Buffer<T>,
    at:     usize,
    n:      usize,
    tail:   usize,
}

impl<'a, T> Gap<'a, T> {
    /// Requires `at <= buf.len` and `buf.len + n <= buf.cap`.
    pub(super) fn open(buf: &'a mut Buffer<T>, at: usize, n: usize) -> Self {
        assert!(at <= buf.len);
        assert!(n <= buf.cap - buf.len);
        let tail = buf.len - at;
        // SAFETY: ✔️ `[at, len)` is live, `[at+n, len+n)` is within capacity, `ptr::copy` tolerates the overlap
        unsafe { ptr::copy(buf.slot(at), buf.slot(at + n), tail) };
        buf.len = at;
        Self { buf, at, n, tail }
    }

    /// First slot of the gap.
    pub(super) fn start(&self) -> *mut T { self.buf.slot(self.at) }

    /// The buffer's elements by their pre-gap indices.
    pub(super) fn displaced(&self) -> Displaced<T> { Displaced { data: self.buf.data, at: self.at, shift: self.n, len: self.at + self.tail } }

    /// Declare all `n` gap slots constructed.
    ///
    /// ### Safety
    /// *   every slot of the gap must be initialized
    pub(super) unsafe fn fill(self) {
        let mut this = ManuallyDrop::new(self);
        this.buf.len = this.at + this.n + this.tail;
    }
}

impl<T> Drop for Gap<'_, T> {
    fn drop(&mut self) {
        // SAFETY: ✔️ the tail still sits `n` slots right of where it came from, and the gap holds nothing live
        unsafe { ptr::copy(self.buf.slot(self.at + self.n), self.buf.slot(self.at), self.tail) };
        self.buf.len = self.at + self.tail;
    }
}

/// Destroy `[first, last)` (last first), then move the tail left to close the hole.  Capacity is untouched.
pub(super) fn erase<T>(buf: &mut Buffer<T>, first: usize, last: usize) {
    assert!(first <= last && last <= buf.len, "erase range {first}..{last} should be within 0..{}", buf.len);
    let len = buf.len;
    let n = last - first;
    if n == 0 { return }
    buf.len = first;
    // SAFETY: ✔️ `[first, last)` is live and no longer counted
    unsafe { destroy_run(buf.slot(first), n) };
    // SAFETY: ✔️ `[last, len)` is live, `[first, len-n)` holds nothing live, `ptr::copy` tolerates the overlap
    unsafe { ptr::copy(buf.slot(last), buf.slot(first), len - last) };
    buf.len = len - n;
}



#[cfg(test)] fn buffer_of(values: &[u32], cap: usize) -> (Buffer<u32>, std::vec::Vec<u32>) {
    let mut storage = std::vec::Vec::with_capacity(cap);
    storage.extend_from_slice(values);
    let data = NonNull::new(storage.as_mut_ptr()).unwrap();
    (unsafe { Buffer::from_raw_parts(data, values.len(), cap) }, storage)
}

#[test] fn gap_round_trip() {
    let (mut buf, _storage) = buffer_of(&[1, 2, 3, 4, 5], 8);
    {
        let gap = Gap::open(&mut buf, 1, 3);
        let d = gap.displaced();
        assert_eq!([*d.get(0), *d.get(1), *d.get(4)], [1, 2, 5]);
    }
    assert_eq!(buf.live(), [1, 2, 3, 4, 5]);

    let gap = Gap::open(&mut buf, 2, 2);
    let d = gap.displaced();
    let (a, b) = (*d.get(4), *d.get(0));
    unsafe { gap.start().write(a) };
    unsafe { gap.start().add(1).write(b) };
    unsafe { gap.fill() };
    assert_eq!(buf.live(), [1, 2, 5, 1, 3, 4, 5]);
}

#[test] fn erase_shifts_tail_left() {
    let (mut buf, _storage) = buffer_of(&[1, 2, 3, 4, 5], 5);
    erase(&mut buf, 0, 3);
    assert_eq!((buf.live(), buf.cap), (&[4, 5][..], 5));
    erase(&mut buf, 1, 2);
    assert_eq!(buf.live(), [4]);
    erase(&mut buf, 1, 1);
    assert_eq!(buf.live(), [4]);
}
