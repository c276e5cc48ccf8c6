#![cfg(all(feature = "alloc", feature = "panicy-memory"))]
//! Model based properties: a [`GlobalArray`] must agree with [`Vec`] after any sequence of operations.

use darray::GlobalArray;
use darray::allocator::debug::FaultInjector;
use darray::DArray;

use proptest::prelude::*;



#[derive(Clone, Debug)] enum Op {
    Push(u8),
    Insert(usize, u8),
    InsertN(usize, u8, usize),
    InsertFromWithin(usize, usize),
    InsertRangeFromWithin(usize, usize, usize),
    Erase(usize),
    EraseRange(usize, usize),
    Pop,
    Truncate(usize),
    Reserve(usize),
    ShrinkToFit,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u8>().prop_map(Op::Push),
        (any::<usize>(), any::<u8>()).prop_map(|(i, v)| Op::Insert(i, v)),
        (any::<usize>(), any::<u8>(), 0_usize .. 5).prop_map(|(i, v, n)| Op::InsertN(i, v, n)),
        (any::<usize>(), any::<usize>()).prop_map(|(i, s)| Op::InsertFromWithin(i, s)),
        (any::<usize>(), any::<usize>(), any::<usize>()).prop_map(|(i, a, b)| Op::InsertRangeFromWithin(i, a, b)),
        any::<usize>().prop_map(Op::Erase),
        (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::EraseRange(a, b)),
        Just(Op::Pop),
        (0_usize .. 40).prop_map(Op::Truncate),
        (0_usize .. 64).prop_map(Op::Reserve),
        Just(Op::ShrinkToFit),
    ]
}

/// `(lo, hi)` with `lo <= hi <= len`
fn span(a: usize, b: usize, len: usize) -> (usize, usize) {
    let (a, b) = (a % (len + 1), b % (len + 1));
    (a.min(b), a.max(b))
}

proptest! {
    #[test]
    fn with_len_sets_size_and_capacity(n in 0_usize .. 300) {
        let a = GlobalArray::<u64>::try_with_len(n).unwrap();
        prop_assert_eq!(a.len(), n);
        prop_assert_eq!(a.capacity(), n);
    }

    #[test]
    fn from_elem_repeats(value in any::<i32>(), n in 0_usize .. 300) {
        let a = GlobalArray::try_from_elem_in(&value, n, Default::default()).unwrap();
        prop_assert_eq!(a.len(), n);
        prop_assert!(a.iter().all(|v| *v == value));
    }

    #[test]
    fn clone_is_independent(values in proptest::collection::vec(any::<u16>(), 0 .. 50), extra in any::<u16>()) {
        let a = GlobalArray::try_from_slice_in(&values, Default::default()).unwrap();
        let mut b = a.clone();
        prop_assert_eq!(&a, &b);
        b.push(extra);
        prop_assert_eq!(a.as_slice(), values.as_slice());
    }

    #[test]
    fn matches_vec(ops in proptest::collection::vec(op(), 0 .. 60)) {
        let mut model = Vec::<u8>::new();
        let mut a = GlobalArray::<u8>::new();
        for op in ops {
            let len = model.len();
            match op {
                Op::Push(v) => { model.push(v); a.try_push(v).unwrap() },
                Op::Insert(i, v) => { let i = i % (len + 1); model.insert(i, v); a.try_insert(i, v).unwrap() },
                Op::InsertN(i, v, n) => {
                    let i = i % (len + 1);
                    model.splice(i..i, std::iter::repeat(v).take(n));
                    a.try_insert_n(i, &v, n).unwrap();
                },
                Op::InsertFromWithin(i, s) => {
                    if len == 0 { continue }
                    let (i, s) = (i % (len + 1), s % len);
                    let v = model[s];
                    model.insert(i, v);
                    a.try_insert_from_within(i, s).unwrap();
                },
                Op::InsertRangeFromWithin(i, lo, hi) => {
                    let i = i % (len + 1);
                    let (lo, hi) = span(lo, hi, len);
                    let run = model[lo..hi].to_vec();
                    model.splice(i..i, run);
                    a.try_insert_range_from_within(i, lo..hi).unwrap();
                },
                Op::Erase(i) => {
                    if len == 0 { continue }
                    let i = i % len;
                    model.remove(i);
                    a.erase(i);
                },
                Op::EraseRange(lo, hi) => {
                    let (lo, hi) = span(lo, hi, len);
                    model.drain(lo..hi);
                    a.erase_range(lo..hi);
                },
                Op::Pop => { prop_assert_eq!(a.pop(), model.pop()) },
                Op::Truncate(n) => { model.truncate(n); a.truncate(n) },
                Op::Reserve(n) => {
                    let cap = a.capacity();
                    a.try_reserve(n).unwrap();
                    prop_assert_eq!(a.capacity(), cap.max(n));
                },
                Op::ShrinkToFit => { a.shrink_to_fit(); prop_assert_eq!(a.capacity(), a.len()) },
            }
            prop_assert_eq!(a.as_slice(), model.as_slice());
            prop_assert!(a.len() <= a.capacity());
        }
    }

    #[test]
    fn allocation_failure_changes_nothing(values in proptest::collection::vec(any::<u32>(), 1 .. 20), at in any::<usize>(), n in 1_usize .. 40) {
        let fi = FaultInjector::new();
        let mut a = DArray::try_from_slice_in(&values, &fi).unwrap();
        let at = at % (a.len() + 1);
        fi.fail_at(fi.allocations() + 1);
        let e = a.try_insert_n(at, &7, n).unwrap_err();
        prop_assert!(e.is_out_of_memory());
        prop_assert_eq!(a.as_slice(), values.as_slice());
        prop_assert_eq!(a.capacity(), values.len());
        drop(a);
        prop_assert_eq!(fi.outstanding(), 0);
    }
}
