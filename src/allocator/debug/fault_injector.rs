#![cfg(any(feature = "alloc", test))]

use crate::*;
use crate::allocator::alloc::Global;
use crate::meta::*;

use core::alloc::Layout;
use core::cell::Cell;



/// Counts every allocation and deallocation it forwards to [`Global`], and can be told to refuse allocations.
///
/// Allocations are numbered from 1.  After <code>[fail_at](Self::fail_at)(k)</code>, the `k`th allocation and every
/// attempt after it fails, since a refused attempt doesn't advance the count.  Share one instance between containers
/// by reference: <code>[DArray]&lt;T, &amp;[FaultInjector]&gt;</code>.
///
/// ```
/// # use darray::{DArray, allocator::debug::FaultInjector};
/// let fi = FaultInjector::new();
/// let mut a = DArray::new_in(&fi);
/// a.try_push(1_u32).unwrap();
/// fi.fail_at(fi.allocations() + 1);
/// assert!(a.try_reserve(100).is_err());
/// assert_eq!(a.capacity(), 1);
/// drop(a);
/// assert_eq!(fi.outstanding(), 0);
/// ```
///
/// [DArray]: crate::DArray
#[derive(Debug, Default)] pub struct FaultInjector {
    allocations:    Cell<usize>,
    deallocations:  Cell<usize>,
    refused:        Cell<usize>,
    fail_at:        Cell<Option<usize>>,
}

impl FaultInjector {
    pub const fn new() -> Self {
        Self {
            allocations:    Cell::new(0),
            deallocations:  Cell::new(0),
            refused:        Cell::new(0),
            fail_at:        Cell::new(None),
        }
    }

    /// Refuse the `k`th allocation (counting from 1 since construction) and everything after it.
    pub fn fail_at(&self, k: usize) { self.fail_at.set(Some(k)) }

    /// Stop refusing allocations.
    pub fn disarm(&self) { self.fail_at.set(None) }

    /// Successful allocations so far.
    pub fn allocations(&self) -> usize { self.allocations.get() }

    /// Deallocations so far.
    pub fn deallocations(&self) -> usize { self.deallocations.get() }

    /// Allocation attempts that were refused.
    pub fn refused(&self) -> usize { self.refused.get() }

    /// Allocations not yet freed.
    pub fn outstanding(&self) -> usize { self.allocations() - self.deallocations() }

    fn admit(&self) -> Result<(), ()> {
        if self.fail_at.get() == Some(self.allocations.get() + 1) {
            self.refused.set(self.refused.get() + 1);
            Err(())
        } else {
            Ok(())
        }
    }
}

impl Meta for FaultInjector {
    type Error                  = ();
    const MAX_ALIGN : Alignment = Global::MAX_ALIGN;
    const MAX_SIZE  : usize     = Global::MAX_SIZE;
}

// SAFETY: ✔️ forwards to `Global`
unsafe impl fat::Alloc for FaultInjector {
    fn alloc_uninit(&self, layout: Layout) -> Result<AllocNN, Self::Error> {
        self.admit()?;
        let alloc = fat::Alloc::alloc_uninit(&Global, layout)?;
        self.allocations.set(self.allocations.get() + 1);
        Ok(alloc)
    }

    fn alloc_zeroed(&self, layout: Layout) -> Result<AllocNN0, Self::Error> {
        self.admit()?;
        let alloc = fat::Alloc::alloc_zeroed(&Global, layout)?;
        self.allocations.set(self.allocations.get() + 1);
        Ok(alloc)
    }
}

// SAFETY: ✔️ forwards to `Global`, which allocated everything `self` handed out
unsafe impl fat::Free for FaultInjector {
    #[track_caller] unsafe fn free(&self, ptr: AllocNN, layout: Layout) {
        if self.deallocations.get() >= self.allocations.get() { bug::ub::freed_ptr_for_allocator(ptr) }
        self.deallocations.set(self.deallocations.get() + 1);
        // SAFETY: ✔️ `ptr` came from `Global` with `layout` per `fat::Free::free`'s preconditions
        unsafe { fat::Free::free(&Global, ptr, layout) }
    }
}



#[test] fn fat_alignment()          { fat::test::alignment(&FaultInjector::new()) }
#[test] fn fat_edge_case_sizes()    { fat::test::edge_case_sizes(&FaultInjector::new()) }
#[test] fn fat_zeroed()             { fat::test::zeroed_alloc(&FaultInjector::new()) }

#[test] fn sticky_failure() {
    use fat::*;
    let fi = FaultInjector::new();
    let layout = Layout::new::<u64>();
    fi.fail_at(2);
    let a = fi.alloc_uninit(layout).unwrap();
    assert!(fi.alloc_uninit(layout).is_err());
    assert!(fi.alloc_zeroed(layout).is_err());
    assert_eq!(fi.refused(), 2);
    fi.disarm();
    let b = fi.alloc_zeroed(layout).unwrap();
    assert_eq!(fi.allocations(), 2);
    unsafe { fi.free(a, layout) };
    unsafe { fi.free(b.cast(), layout) };
    assert_eq!(fi.outstanding(), 0);
}

#[test] #[should_panic(expected = "already freed")] fn double_free() {
    use fat::*;
    let fi = FaultInjector::new();
    let layout = Layout::new::<u64>();
    let a = fi.alloc_uninit(layout).unwrap();
    unsafe { fi.free(a, layout) };
    let b = fi.alloc_uninit(layout).unwrap();
    unsafe { fi.free(b, layout) };
    unsafe { fi.free(b, layout) };
}
