//! Failure injection and aliasing scenarios spanning several [`DArray`] operations.

use crate::allocator::alloc::Global;
use crate::allocator::debug::{FaultInjector, Null};
use crate::array::{DArray, GlobalArray};
use crate::error::*;
use crate::util::drop::{Probe, expect_panic};

use std::vec::Vec;



fn ids<A: crate::fat::Free>(a: &DArray<Probe, A>) -> Vec<i32> { a.iter().map(Probe::id).collect() }

fn probes<'a>(fi: &'a FaultInjector, ids: &[i32]) -> DArray<Probe, &'a FaultInjector> {
    DArray::try_from_fn_in(ids.len(), |k| Ok::<_, Error>(Probe::new(ids[k])), fi).unwrap()
}

fn global(values: &[u32]) -> GlobalArray<u32> { GlobalArray::try_from_slice_in(values, Global).unwrap() }

#[derive(Debug, PartialEq)] enum Failure { Array(Error), Refused }
impl From<Error> for Failure { fn from(e: Error) -> Self { Failure::Array(e) } }



#[test] fn with_len_fills_exactly() {
    for n in [0, 1, 2, 7, 64] {
        let a = GlobalArray::<u32>::try_with_len(n).unwrap();
        assert_eq!((a.len(), a.capacity()), (n, n));
        assert!(a.iter().all(|v| *v == 0));
    }

    let fi = FaultInjector::new();
    let a = DArray::<u64, _>::try_with_len_in(0, &fi).unwrap();
    assert_eq!(a.capacity(), 0);
    assert_eq!(fi.allocations(), 0);
}

#[test] fn from_elem_and_zeroed() {
    let a = GlobalArray::try_from_elem_in(&7_u16, 5, Global).unwrap();
    assert_eq!(a, [7; 5]);
    let z = GlobalArray::<u32>::try_zeroed_in(4, Global).unwrap();
    assert_eq!((z.as_slice(), z.capacity()), (&[0, 0, 0, 0][..], 4));
}

#[test] fn push_capacity_progression() {
    let mut a = GlobalArray::<u8>::new();
    let mut caps = Vec::new();
    for i in 0 .. 9 {
        a.try_push(i).unwrap();
        assert_eq!(a.len(), usize::from(i) + 1);
        caps.push(a.capacity());
    }
    assert_eq!(caps, [1, 2, 4, 4, 8, 8, 8, 8, 16]);
}

#[test] fn clone_is_deep_and_tight() {
    let mut a = global(&[1, 2, 3]);
    a.try_reserve(10).unwrap();
    let mut b = a.try_clone().unwrap();
    assert_eq!((b.len(), b.capacity()), (3, 3));
    assert_eq!(a, b);
    b[0] = 100;
    b.try_push(4).unwrap();
    assert_eq!(a, [1, 2, 3]);
    assert_eq!(a.capacity(), 10);
}

#[test] fn take_and_move_from() {
    let mut a = global(&[1, 2, 3]);
    a.try_reserve(8).unwrap();
    let b = a.take();
    assert_eq!((a.len(), a.capacity()), (0, 0));
    assert_eq!((b.as_slice(), b.capacity()), (&[1, 2, 3][..], 8));

    let mut c = global(&[9]);
    let mut b = b;
    c.move_from(&mut b);
    assert_eq!((c.as_slice(), c.capacity()), (&[1, 2, 3][..], 8));
    assert_eq!((b.len(), b.capacity()), (0, 0));
}

#[test] fn swap_with() {
    let mut a = global(&[1, 2]);
    let mut b = global(&[3]);
    a.swap_with(&mut b);
    assert_eq!((a.as_slice(), b.as_slice()), (&[3][..], &[1, 2][..]));
}



#[test] fn push_survives_allocation_failure_at_every_step() {
    for k in 1 ..= 6 {
        Probe::reset();
        let fi = FaultInjector::new();
        {
            let mut a = DArray::new_in(&fi);
            fi.fail_at(k);
            for i in 0 .. 40 {
                let (before, cap) = (ids(&a), a.capacity());
                if let Err((rejected, e)) = a.try_push(Probe::new(i)) {
                    assert!(e.is_out_of_memory());
                    assert_eq!(rejected.id(), i);
                    assert_eq!(ids(&a), before);
                    assert_eq!(a.capacity(), cap);
                }
            }
            assert_eq!(fi.allocations(), k - 1);
        }
        assert_eq!(fi.outstanding(), 0);
        assert_eq!(Probe::live(), 0);
    }
}

#[test] fn insert_survives_allocation_failure() {
    Probe::reset();
    let fi = FaultInjector::new();
    let mut a = probes(&fi, &[0, 1, 2, 3]);
    let proto = Probe::new(9);
    fi.fail_at(fi.allocations() + 1);

    assert!(a.try_insert_n(2, &proto, 3).unwrap_err().is_out_of_memory());
    assert!(a.try_insert_from_within(0, 3).unwrap_err().is_out_of_memory());
    assert!(a.try_extend_from_within(..).unwrap_err().is_out_of_memory());
    assert!(a.try_emplace_with(1, || Probe::new(5)).is_err());
    assert!(a.try_reserve(100).is_err());
    assert_eq!(ids(&a), [0, 1, 2, 3]);
    assert_eq!(a.capacity(), 4);
    assert_eq!(Probe::live(), 5);

    fi.disarm();
    a.try_insert_n(2, &proto, 3).unwrap();
    assert_eq!(ids(&a), [0, 1, 9, 9, 9, 2, 3]);
    drop((a, proto));
    assert_eq!(Probe::live(), 0);
    assert_eq!(fi.outstanding(), 0);
}

#[test] fn assign_failure_leaves_target_untouched() {
    Probe::reset();
    let fi = FaultInjector::new();
    let mut a = probes(&fi, &[1, 2, 3]);
    let b = probes(&fi, &[4, 5]);
    fi.fail_at(fi.allocations() + 1);
    assert!(a.try_assign_from(&b).unwrap_err().is_out_of_memory());
    assert!(a.try_assign_elem(&b[0], 7).unwrap_err().is_out_of_memory());
    assert_eq!(ids(&a), [1, 2, 3]);
    fi.disarm();

    a.try_assign_from(&b).unwrap();
    assert_eq!((ids(&a), a.capacity()), (std::vec![4, 5], 2));
    drop((a, b));
    assert_eq!(Probe::live(), 0);
    assert_eq!(fi.outstanding(), 0);
}

#[test] fn assign_nothing_keeps_capacity() {
    let mut a = global(&[1, 2, 3]);
    a.try_assign_slice(&[]).unwrap();
    assert_eq!((a.len(), a.capacity()), (0, 3));
    a.try_assign_elem(&5, 2).unwrap();
    assert_eq!((a.as_slice(), a.capacity()), (&[5, 5][..], 2));
}



#[test] fn clone_failure_during_build_unwinds() {
    for k in 1 ..= 5 {
        Probe::reset();
        let fi = FaultInjector::new();
        let proto = Probe::new(1);
        Probe::fail_on_nth(k);
        expect_panic(|| DArray::try_from_elem_in(&proto, 5, &fi));
        assert_eq!(Probe::constructed(), k);
        assert_eq!(Probe::live(), 1);
        assert_eq!(fi.outstanding(), 0);
    }
}

#[test] fn clone_failure_during_shift_restores_order() {
    Probe::reset();
    let fi = FaultInjector::new();
    let mut a = probes(&fi, &[0, 1, 2, 3, 4]);
    a.try_reserve(10).unwrap();
    let proto = Probe::new(9);

    Probe::fail_on_nth(2);
    expect_panic(|| a.try_insert_n(2, &proto, 3));
    assert_eq!(ids(&a), [0, 1, 2, 3, 4]);
    assert_eq!(a.capacity(), 10);
    assert_eq!(Probe::live(), 6);

    Probe::fail_on_nth(1);
    expect_panic(|| a.try_insert_range_from_within(1, 3..5));
    assert_eq!(ids(&a), [0, 1, 2, 3, 4]);
    assert_eq!(Probe::live(), 6);
}

#[test] fn clone_failure_during_grow_keeps_old_block() {
    Probe::reset();
    let fi = FaultInjector::new();
    let mut a = probes(&fi, &[0, 1, 2, 3, 4]);
    let proto = Probe::new(9);
    let old = a.as_ptr();

    Probe::fail_on_nth(3);
    expect_panic(|| a.try_insert_n(1, &proto, 3));
    assert_eq!(ids(&a), [0, 1, 2, 3, 4]);
    assert_eq!((a.capacity(), a.as_ptr()), (5, old));
    assert_eq!(fi.outstanding(), 1);
    assert_eq!(Probe::live(), 6);
}

#[test] fn clone_failure_during_assign_keeps_old_contents() {
    Probe::reset();
    let fi = FaultInjector::new();
    let mut a = probes(&fi, &[1, 2, 3]);
    let b = probes(&fi, &[4, 5, 6, 7]);
    Probe::fail_on_nth(4);
    expect_panic(|| a.try_assign_from(&b));
    assert_eq!((ids(&a), a.capacity()), (std::vec![1, 2, 3], 3));
    assert_eq!(fi.outstanding(), 2);
    assert_eq!(Probe::live(), 7);
}

#[test] fn constructor_errors_roll_back() {
    let mut a = global(&[1, 2, 3]);
    a.try_reserve(8).unwrap();

    let r = a.try_emplace(1, || Err(Failure::Refused));
    assert_eq!(r, Err(Failure::Refused));
    let r = a.try_assign_with(5, |k| if k == 3 { Err(Failure::Refused) } else { Ok(k as u32) });
    assert_eq!(r, Err(Failure::Refused));
    assert_eq!((a.as_slice(), a.capacity()), (&[1, 2, 3][..], 8));

    let r = DArray::try_from_fn_in(3, |k| if k == 2 { Err(Failure::Refused) } else { Ok(k) }, Null);
    assert_eq!(r.map(|_| ()), Err(Failure::Array(Error::OutOfMemory(OutOfMemoryError { requested: core::alloc::Layout::new::<[usize; 3]>() }))));

    *a.try_emplace(1, || Ok::<_, Failure>(7)).unwrap() += 1;
    assert_eq!(a, [1, 8, 2, 3]);
    a.try_emplace_back(|| Ok::<_, Error>(4)).unwrap();
    assert_eq!(a, [1, 8, 2, 3, 4]);
}



#[test] fn insert_value_mid_array() {
    let mut a = global(&[1, 2, 3, 4, 5]);
    a.try_insert(3, 255).unwrap();
    assert_eq!(a, [1, 2, 3, 255, 4, 5]);

    let mut a = global(&[1, 2, 3, 4, 5]);
    a.try_reserve(6).unwrap();
    a.try_insert_clone(3, &255).unwrap();
    assert_eq!((a.as_slice(), a.capacity()), (&[1, 2, 3, 255, 4, 5][..], 6));
}

#[test] fn insert_aliased_back_at_front() {
    let mut grow = global(&[1, 2, 3, 4, 5]);
    let back = grow.len() - 1;
    grow.try_insert_from_within(0, back).unwrap();
    assert_eq!(grow, [5, 1, 2, 3, 4, 5]);

    let mut shift = global(&[1, 2, 3, 4, 5]);
    shift.try_reserve(8).unwrap();
    shift.try_insert_from_within(0, back).unwrap();
    assert_eq!((shift.as_slice(), shift.capacity()), (&[5, 1, 2, 3, 4, 5][..], 8));

    shift.try_insert_n_from_within(2, 0, 2).unwrap();
    assert_eq!(shift, [5, 1, 5, 5, 2, 3, 4, 5]);
}

#[test] fn insert_range_straddling_position() {
    for reserve in [0, 16] {
        let mut a = global(&[1, 2, 3, 4, 5]);
        a.try_reserve(reserve).unwrap();
        a.try_insert_range_from_within(2, 1..4).unwrap();
        assert_eq!(a, [1, 2, 2, 3, 4, 3, 4, 5]);
        a.try_extend_from_within(..3).unwrap();
        assert_eq!(a, [1, 2, 2, 3, 4, 3, 4, 5, 1, 2, 2]);
    }
}

#[test] fn from_within_bounds() {
    let mut a = global(&[1, 2, 3]);
    assert_eq!(a.try_insert_from_within(0, 3), Err(Error::OutOfBounds(OutOfBoundsError { index: 3, len: 3 })));
    assert_eq!(a.try_extend_from_within(2..5), Err(Error::OutOfBounds(OutOfBoundsError { index: 5, len: 3 })));
    assert_eq!(a, [1, 2, 3]);
}

#[test] #[should_panic(expected = "insertion index (is 4) should be <= len (is 3)")] fn insert_past_end() {
    let mut a = global(&[1, 2, 3]);
    let _ = a.try_insert(4, 0);
}



#[test] fn erase_front_range() {
    let mut a = global(&[1, 2, 3, 4, 5]);
    a.erase_range(0..3);
    assert_eq!((a.as_slice(), a.len(), a.capacity()), (&[4, 5][..], 2, 5));
    a.erase(0);
    assert_eq!(a, [5]);
}

#[test] fn erase_destroys_exactly_the_range() {
    Probe::reset();
    let fi = FaultInjector::new();
    let mut a = probes(&fi, &[0, 1, 2, 3, 4, 5]);
    a.erase_range(1..=2);
    assert_eq!((ids(&a), Probe::live()), (std::vec![0, 3, 4, 5], 4));
    a.erase_range(2..);
    assert_eq!((ids(&a), Probe::live()), (std::vec![0, 3], 2));
    a.erase_range(1..1);
    assert_eq!(a.capacity(), 6);
}

#[test] #[should_panic(expected = "erase range is out of bounds")] fn erase_past_end() { global(&[1, 2]).erase_range(1..3) }

#[test] fn remove_pop_truncate() {
    let mut a = global(&[1, 2, 3, 4, 5]);
    assert_eq!(a.try_remove(1), Some(2));
    assert_eq!(a.try_remove(4), None);
    assert_eq!(a.pop(), Some(5));
    a.truncate(1);
    assert_eq!(a, [1]);
    a.clear();
    assert!(a.is_empty());
    assert_eq!(a.pop(), None);
    assert_eq!(a.capacity(), 5);
}



#[test] fn checked_access() {
    let mut a = global(&[10, 20, 30]);
    for i in 0 .. a.len() { assert_eq!(a.at(i).copied(), Ok(a[i])) }
    for i in a.len() .. a.len() + 10 { assert_eq!(a.at(i), Err(OutOfBoundsError { index: i, len: 3 })) }
    *a.at_mut(1).unwrap() = 21;
    *a.front_mut() += 1;
    *a.back_mut() += 1;
    assert_eq!((*a.front(), *a.back()), (11, 31));
    assert_eq!(a, [11, 21, 31]);
}

#[test] #[should_panic(expected = "back() called on an empty DArray")] fn back_of_empty() { let _ = GlobalArray::<u32>::new().back(); }

#[test] fn reserve_is_exact_and_absolute() {
    let mut a = global(&[1, 2]);
    a.try_reserve(1).unwrap();
    assert_eq!(a.capacity(), 2);
    a.try_reserve(7).unwrap();
    assert_eq!((a.as_slice(), a.capacity()), (&[1, 2][..], 7));
    assert_eq!(a.spare_capacity_mut().len(), 5);
}

#[test] fn shrink_to_fit_is_best_effort() {
    let fi = FaultInjector::new();
    let mut a = DArray::new_in(&fi);
    a.try_extend_from_slice(&[1_u64, 2, 3]).unwrap();
    a.try_reserve(10).unwrap();

    fi.fail_at(fi.allocations() + 1);
    a.shrink_to_fit();
    assert_eq!((a.as_slice(), a.capacity()), (&[1, 2, 3][..], 10));

    fi.disarm();
    a.shrink_to_fit();
    assert_eq!((a.as_slice(), a.capacity()), (&[1, 2, 3][..], 3));

    a.clear();
    a.shrink_to_fit();
    assert_eq!(a.capacity(), 0);
    assert_eq!(fi.outstanding(), 0);
}

#[test] fn size_limit_checked_before_allocating() {
    let fi = FaultInjector::new();
    let e = DArray::<u64, _>::try_with_len_in(usize::MAX / 8, &fi).unwrap_err();
    assert!(e.is_size_limit());

    let mut a = DArray::<u64, _>::new_in(&fi);
    assert!(a.try_reserve(usize::MAX).unwrap_err().is_size_limit());
    a.try_push(1).unwrap();
    assert!(a.try_insert_n(0, &0, usize::MAX).unwrap_err().is_size_limit());
    assert_eq!((fi.allocations(), fi.refused()), (1, 0));
    assert_eq!(a.max_len(), (usize::MAX / 2) / 8);
}

#[test] fn zero_sized_elements_never_allocate() {
    let mut a = DArray::<(), Null>::new();
    for _ in 0 .. 1000 { a.try_push(()).unwrap() }
    a.try_insert_n(10, &(), 24).unwrap();
    assert_eq!(a.len(), 1024);
    assert_eq!(a.capacity(), 1024);
    assert_eq!(a.max_len(), usize::MAX);
    a.erase_range(..1000);
    a.shrink_to_fit();
    assert_eq!((a.len(), a.capacity()), (24, 24));
}

#[test] fn null_allocator_refuses() {
    let mut a = DArray::<u32, Null>::new();
    let (value, e) = a.try_push(42).unwrap_err();
    assert_eq!(value, 42);
    assert!(e.is_out_of_memory());
    assert_eq!(a.capacity(), 0);
}

#[test] fn raw_parts_round_trip() {
    let a = global(&[1, 2, 3]);
    let (data, len, cap, _global) = a.into_raw_parts_with_allocator();
    let b = unsafe { GlobalArray::from_raw_parts(data, len, cap) };
    assert_eq!(b, [1, 2, 3]);
}

#[test] fn from_array_moves() {
    Probe::reset();
    let fi = FaultInjector::new();
    let a = DArray::try_from_array_in([Probe::new(1), Probe::new(2)], &fi).unwrap();
    assert_eq!((ids(&a), Probe::constructed()), (std::vec![1, 2], 2));
    drop(a);
    assert_eq!(Probe::live(), 0);

    fi.fail_at(fi.allocations() + 1);
    assert!(DArray::try_from_array_in([Probe::new(3)], &fi).is_err());
    assert_eq!(Probe::live(), 0);
}
