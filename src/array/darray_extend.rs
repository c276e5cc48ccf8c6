#![cfg(feature = "panicy-memory")]

use crate::array::DArray;
use crate::fat::*;



impl<T, A: Alloc + Free> Extend<T> for DArray<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.try_reserve_amortized(iter.size_hint().0).expect("unable to reserve more memory");
        for item in iter { self.push(item) }
    }
}

impl<'a, T: Copy + 'a, A: Alloc + Free> Extend<&'a T> for DArray<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        <Self as Extend<T>>::extend(self, iter.into_iter().copied())
    }
}

impl<T, A: Alloc + Free + Default> FromIterator<T> for DArray<T, A> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut v = Self::new();
        v.extend(iter);
        v
    }
}

impl<T, A: Alloc + Free + Default, const N: usize> From<[T; N]> for DArray<T, A> {
    fn from(array: [T; N]) -> Self { Self::try_from_array_in(array, A::default()).expect("out of memory") }
}



#[test] fn collect_and_extend() {
    use crate::GlobalArray;
    let mut a : GlobalArray<u32> = (1 ..= 3).collect();
    a.extend([4, 5]);
    a.extend(&[6, 7]);
    assert_eq!(a, [1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(a.capacity(), 12);
    assert_eq!(GlobalArray::from([1, 2]), [1, 2]);
}

#[test] fn extend_sizes_up_front() {
    use crate::allocator::debug::FaultInjector;
    let fi = FaultInjector::new();
    let mut a = DArray::<u32, _>::new_in(&fi);
    a.extend(0 .. 100);
    assert_eq!((a.len(), a.capacity(), fi.allocations()), (100, 100, 1));

    a.extend(&[100, 101, 102]);
    assert_eq!((a.capacity(), fi.allocations()), (200, 2));

    // no lower bound: falls back to growing per push
    a.extend((0 .. 150).filter(|_| true));
    assert_eq!((a.len(), a.capacity(), fi.allocations()), (253, 400, 3));
    assert_eq!(fi.outstanding(), 1);
}
