use super::construct::destroy_run;
use super::storage;
use crate::array::DArray;
use crate::fat::*;

use core::iter::FusedIterator;
use core::ptr::NonNull;



impl<T, A: Free> IntoIterator for DArray<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;
    fn into_iter(self) -> Self::IntoIter {
        let (data, len, cap, allocator) = self.into_raw_parts_with_allocator();
        IntoIter { data, front: 0, back: len, cap, allocator }
    }
}

impl<'a, T, A: Free> IntoIterator for &'a DArray<T, A> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter { self.as_slice().iter() }
}

impl<'a, T, A: Free> IntoIterator for &'a mut DArray<T, A> {
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;
    fn into_iter(self) -> Self::IntoIter { self.as_slice_mut().iter_mut() }
}

/// [`DArray`] converted into an iterator (e.g. the result of <code>darray.[into_iter](DArray::into_iter)\(\)</code>)
pub struct IntoIter<T, A: Free> {
    data:       NonNull<T>,
    front:      usize,
    back:       usize,
    cap:        usize,
    allocator:  A,
}

impl<T, A: Free> IntoIter<T, A> {
    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: ✔️ `[front, back)` is still live
        unsafe { core::slice::from_raw_parts(self.data.as_ptr().add(self.front), self.back - self.front) }
    }
}

impl<T, A: Free> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        // SAFETY: ✔️ `[front, back)` is still live and owned by `self`
        unsafe { destroy_run(self.data.as_ptr().add(self.front), self.back - self.front) };
        // SAFETY: ✔️ `data` was allocated by `allocator` for `cap` elements
        unsafe { storage::deallocate(&self.allocator, self.data, self.cap) };
    }
}

impl<T, A: Free> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back { return None }
        // SAFETY: ✔️ `front` is live, and no longer counted afterwards
        let item = unsafe { self.data.as_ptr().add(self.front).read() };
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl<T, A: Free> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back { return None }
        self.back -= 1;
        // SAFETY: ✔️ `back` was live, and is no longer counted
        Some(unsafe { self.data.as_ptr().add(self.back).read() })
    }
}

impl<T, A: Free> ExactSizeIterator for IntoIter<T, A> {}
impl<T, A: Free> FusedIterator for IntoIter<T, A> {}

// SAFETY: ✔️ owns its remaining elements like `DArray` does
unsafe impl<T: Send, A: Free + Send> Send for IntoIter<T, A> {}
// SAFETY: ✔️ owns its remaining elements like `DArray` does
unsafe impl<T: Sync, A: Free + Sync> Sync for IntoIter<T, A> {}



#[test] fn both_ends() {
    use crate::GlobalArray;
    let a = GlobalArray::try_from_array_in([1, 2, 3, 4], Default::default()).unwrap();
    let mut it = a.into_iter();
    assert_eq!(it.next(), Some(1));
    assert_eq!(it.next_back(), Some(4));
    assert_eq!(it.as_slice(), [2, 3]);
    assert_eq!(it.len(), 2);
    assert_eq!(it.next_back(), Some(3));
    assert_eq!(it.next(), Some(2));
    assert_eq!(it.next(), None);
    assert_eq!(it.next_back(), None);
}

#[test] fn drop_remaining() {
    use crate::allocator::debug::FaultInjector;
    use crate::util::drop::Probe;
    Probe::reset();
    let fi = FaultInjector::new();
    let a = DArray::try_from_fn_in(5, |k| Ok::<_, crate::error::Error>(Probe::new(k as i32)), &fi).unwrap();
    let mut it = a.into_iter();
    assert_eq!(it.next().map(|p| p.id()), Some(0));
    assert_eq!(it.next_back().map(|p| p.id()), Some(4));
    assert_eq!(Probe::live(), 3);
    drop(it);
    assert_eq!(Probe::live(), 0);
    assert_eq!(fi.outstanding(), 0);
}

#[test] fn borrowed() {
    use crate::GlobalArray;
    let mut a = GlobalArray::try_from_array_in([1, 2, 3], Default::default()).unwrap();
    for v in &mut a { *v *= 10 }
    let mut sum = 0;
    for v in &a { sum += *v }
    assert_eq!(sum, 60);
    assert_eq!(a.iter().rev().copied().collect::<std::vec::Vec<_>>(), [30, 20, 10]);
}
