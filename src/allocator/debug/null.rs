use crate::*;
use crate::meta::*;

use core::alloc::Layout;



/// Never allocates anything.
///
/// A [`DArray`](crate::DArray) bound to [`Null`] can still hold zero sized elements, or stay empty forever.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)] pub struct Null;

impl Meta for Null {
    type Error                  = ();
    const MAX_ALIGN : Alignment = Alignment::MAX;
    const MAX_SIZE  : usize     = usize::MAX/2;
}

// SAFETY: ✔️ no state at all
unsafe impl Stateless for Null {}

// SAFETY: ✔️ trivially: nothing is ever allocated
unsafe impl fat::Alloc for Null {
    fn alloc_uninit(&self, _layout: Layout) -> Result<AllocNN, Self::Error> { Err(()) }
    fn alloc_zeroed(&self, _layout: Layout) -> Result<AllocNN0, Self::Error> { Err(()) }
}

// SAFETY: ✔️ trivially: nothing was ever allocated
unsafe impl fat::Free for Null {
    #[track_caller] unsafe fn free(&self, ptr: AllocNN, _layout: Layout) { bug::ub::invalid_ptr_for_allocator(ptr) }
}



#[test] fn fat_alignment()          { fat::test::alignment(Null) }
#[test] fn fat_edge_case_sizes()    { fat::test::edge_case_sizes(Null) }
#[test] fn fat_zeroed()             { fat::test::zeroed_alloc(Null) }
