use crate::*;
use crate::meta::*;

use libc::{calloc, free, malloc};

use core::alloc::Layout;
use core::ptr::NonNull;



/// [`malloc`](https://en.cppreference.com/w/c/memory/malloc) / [`calloc`] / [`free`]
///
/// Requests more aligned than [`Meta::MAX_ALIGN`] fail instead of returning underaligned memory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)] #[repr(transparent)] pub struct Malloc;

impl Meta for Malloc {
    type Error = ();

    /// | Platform          | Value     |
    /// | ------------------| ----------|
    /// | Windows 32-bit    | [`8` according to Microsoft](https://learn.microsoft.com/en-us/cpp/c-runtime-library/reference/malloc#return-value)
    /// | Windows 64-bit    | [`16` according to Microsoft](https://learn.microsoft.com/en-us/cpp/c-runtime-library/reference/malloc#return-value)
    /// | Elsewhere         | <code>[_Alignof](https://en.cppreference.com/w/c/language/_Alignof)\(double\)</code>, a conservative lower bound for `max_align_t`
    const MAX_ALIGN : Alignment = if cfg!(target_env = "msvc") && core::mem::size_of::<usize>() >= 8 { ALIGN_16 } else { Alignment::of::<f64>() };

    const MAX_SIZE  : usize     = isize::MAX as usize;
}

// SAFETY: ✔️ global state only
unsafe impl Stateless for Malloc {}

/// | Safety Item   | Description   |
/// | --------------| --------------|
/// | `align`       | ✔️ Validated via [`fat::test::alignment`], anything above [`Meta::MAX_ALIGN`] is refused up front
/// | `size`        | ✔️ Validated via [`fat::test::edge_case_sizes`].  Zero sized requests fail rather than risk a null/non-null ambiguity
/// | `zeroed`      | ✔️ Validated via [`fat::test::zeroed_alloc`], `calloc` zeroes
// SAFETY: per above
unsafe impl fat::Alloc for Malloc {
    #[track_caller] fn alloc_uninit(&self, layout: Layout) -> Result<AllocNN, Self::Error> {
        if layout.size() == 0 || layout.align() > Self::MAX_ALIGN.as_usize() { return Err(()) }
        // SAFETY: ✔️ this "should" be safe for all nonzero `size`
        let alloc = unsafe { malloc(layout.size()) };
        NonNull::new(alloc.cast()).ok_or(())
    }

    #[track_caller] fn alloc_zeroed(&self, layout: Layout) -> Result<AllocNN0, Self::Error> {
        if layout.size() == 0 || layout.align() > Self::MAX_ALIGN.as_usize() { return Err(()) }
        // SAFETY: ✔️ this "should" be safe for all nonzero `size`
        let alloc = unsafe { calloc(1, layout.size()) };
        NonNull::new(alloc.cast()).ok_or(())
    }
}

// SAFETY: ✔️ `free` is compatible with `malloc` / `calloc` and never fails
unsafe impl fat::Free for Malloc {
    #[track_caller] unsafe fn free(&self, ptr: AllocNN, _layout: Layout) {
        // SAFETY: ✔️ `ptr` belongs to `self` per `fat::Free::free`'s preconditions, ergo came from `malloc` / `calloc`
        unsafe { free(ptr.as_ptr().cast()) }
    }
}



#[test] fn fat_alignment()          { fat::test::alignment(Malloc) }
#[test] fn fat_edge_case_sizes()    { fat::test::edge_case_sizes(Malloc) }
#[test] fn fat_zeroed()             { fat::test::zeroed_alloc(Malloc) }

#[test] fn over_aligned_refused() {
    use fat::*;
    let layout = Layout::from_size_align(64, 4096).unwrap();
    assert!(Malloc.alloc_uninit(layout).is_err());
    assert!(Malloc.alloc_zeroed(layout).is_err());
}
