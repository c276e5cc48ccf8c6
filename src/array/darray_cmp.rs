use crate::array::DArray;
use crate::fat::*;

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};



impl<T: Eq,     A: Free> Eq     for DArray<T, A> {}
impl<T: Ord,    A: Free> Ord    for DArray<T, A> { fn cmp(&self, other: &Self) -> Ordering { <[T]>::cmp(self, other) } }
impl<T: Hash,   A: Free> Hash   for DArray<T, A> { fn hash<H: Hasher>(&self, state: &mut H) { <[T]>::hash::<H>(self, state) } }

impl<T: PartialEq<U>, U, A: Free, B: Free>          PartialEq<DArray<U, B>> for DArray<T, A> { fn eq(&self, other: &DArray<U, B>) -> bool { self.as_slice() == other.as_slice() } }
impl<T: PartialEq<U>, U, A: Free>                   PartialEq<[U]>          for DArray<T, A> { fn eq(&self, other: &[U])         -> bool { self.as_slice() == other } }
impl<T: PartialEq<U>, U, A: Free>                   PartialEq<&[U]>         for DArray<T, A> { fn eq(&self, other: &&[U])        -> bool { self.as_slice() == *other } }
impl<T: PartialEq<U>, U, A: Free, const N: usize>   PartialEq<[U; N]>       for DArray<T, A> { fn eq(&self, other: &[U; N])      -> bool { self.as_slice() == other } }

impl<T: PartialOrd, A: Free> PartialOrd for DArray<T, A> {
    fn partial_cmp  (&self, other: &Self) -> Option<Ordering>   { <[T]>::partial_cmp   (self, other) }
    fn ge           (&self, other: &Self) -> bool               { <[T]>::ge            (self, other) }
    fn gt           (&self, other: &Self) -> bool               { <[T]>::gt            (self, other) }
    fn le           (&self, other: &Self) -> bool               { <[T]>::le            (self, other) }
    fn lt           (&self, other: &Self) -> bool               { <[T]>::lt            (self, other) }
}



#[test] fn compare() {
    use crate::GlobalArray;
    let a = GlobalArray::try_from_array_in([1, 2, 3], Default::default()).unwrap();
    let b = GlobalArray::try_from_slice_in(&[1, 2, 4], Default::default()).unwrap();
    assert!(a < b);
    assert_eq!(a, [1, 2, 3]);
    assert_eq!(a, &[1, 2, 3][..]);
    assert_ne!(a, b);
    assert_eq!(a.cmp(&a), Ordering::Equal);
}
