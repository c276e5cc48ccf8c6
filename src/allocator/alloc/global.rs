use crate::*;
use crate::meta::*;

use core::alloc::Layout;
use core::ptr::NonNull;



/// Use <code>[alloc::alloc]::{[alloc](alloc::alloc::alloc), [alloc_zeroed](alloc::alloc::alloc_zeroed), [dealloc](alloc::alloc::dealloc)}</code>
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)] #[repr(transparent)] pub struct Global;

impl Meta for Global {
    type Error                  = ();
    const MAX_ALIGN : Alignment = Alignment::MAX;
    const MAX_SIZE  : usize     = usize::MAX/2;
}

// SAFETY: ✔️ global state only
unsafe impl Stateless for Global {}

// SAFETY: ✔️ `alloc::alloc::*` honors `layout`, zero sized layouts dangle and are never passed to `dealloc`
unsafe impl fat::Alloc for Global {
    fn alloc_uninit(&self, layout: Layout) -> Result<AllocNN, Self::Error> {
        if layout.size() == 0 { return Ok(dangling(layout)) }
        // SAFETY: ✔️ `layout` is nonzero sized
        let alloc = unsafe { alloc::alloc::alloc(layout) };
        NonNull::new(alloc.cast()).ok_or(())
    }

    fn alloc_zeroed(&self, layout: Layout) -> Result<AllocNN0, Self::Error> {
        if layout.size() == 0 { return Ok(dangling(layout).cast()) }
        // SAFETY: ✔️ `layout` is nonzero sized
        let alloc = unsafe { alloc::alloc::alloc_zeroed(layout) };
        NonNull::new(alloc).ok_or(())
    }
}

// SAFETY: ✔️ frees exactly what `fat::Alloc for Global` allocated
unsafe impl fat::Free for Global {
    unsafe fn free(&self, ptr: AllocNN, layout: Layout) {
        if layout.size() == 0 { return }
        // SAFETY: ✔️ `ptr` was allocated by `alloc::alloc::alloc*` with `layout` per `fat::Free::free`'s preconditions
        unsafe { alloc::alloc::dealloc(ptr.as_ptr().cast(), layout) }
    }
}

fn dangling(layout: Layout) -> AllocNN {
    // SAFETY: ✔️ alignments are nonzero
    unsafe { NonNull::new_unchecked(layout.align() as *mut _) }
}



#[test] fn fat_alignment()          { fat::test::alignment(Global) }
#[test] fn fat_edge_case_sizes()    { fat::test::edge_case_sizes(Global) }
#[test] fn fat_zeroed()             { fat::test::zeroed_alloc(Global) }

#[test] fn zero_sized_dangles() {
    use fat::*;
    let layout = Layout::new::<[u64; 0]>();
    let alloc = Global.alloc_uninit(layout).unwrap();
    assert_eq!(alloc.as_ptr() as usize, core::mem::align_of::<u64>());
    unsafe { Global.free(alloc, layout) };
}
