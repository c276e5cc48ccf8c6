//! Allocator traits operating on [`Layout`]s

use crate::*;

use core::alloc::Layout;
use core::mem::MaybeUninit;
#[cfg(doc)] use core::ptr::NonNull;



/// Allocation functions:<br>
/// <code>[alloc_uninit](Self::alloc_uninit)(layout: [Layout]) -> [Result]&lt;[NonNull]&lt;\_&gt;, \_&gt;</code><br>
/// <code>[alloc_zeroed](Self::alloc_zeroed)(layout: [Layout]) -> [Result]&lt;[NonNull]&lt;\_&gt;, \_&gt;</code><br>
/// <br>
///
/// Allocators know nothing about the lifetimes of what gets constructed in their memory.
/// [`DArray`](crate::DArray) never asks for zero sized allocations.
///
/// ## Safety
/// *   Allocations created by this trait must be freeable by this allocator type's [`Free`].
/// *   Returned allocations must obey `layout` alignment and size.
pub unsafe trait Alloc : meta::Meta {
    /// Allocate at least `layout.size()` bytes of uninitialized memory aligned to `layout.align()`.
    fn alloc_uninit(&self, layout: Layout) -> Result<AllocNN, Self::Error>;

    /// Allocate at least `layout.size()` bytes of zeroed memory aligned to `layout.align()`.
    fn alloc_zeroed(&self, layout: Layout) -> Result<AllocNN0, Self::Error> {
        let alloc = self.alloc_uninit(layout)?;
        // SAFETY: ⚠️ `alloc` is non-null by type, `align` is 1/trivial, `layout.size()` was just allocated, size <= isize::MAX by Layout
        let all = unsafe { core::slice::from_raw_parts_mut(alloc.as_ptr(), layout.size()) };
        all.fill(MaybeUninit::new(0u8));
        Ok(alloc.cast())
    }
}

/// Deallocation function:<br>
/// <code>[free](Self::free)(ptr: [NonNull]&lt;\_&gt;, layout: [Layout])</code><br>
/// <br>
///
/// ## Safety
/// *   This trait must be able to free allocations made by this allocator type's [`Alloc`].
pub unsafe trait Free : meta::Meta {
    /// Deallocate an allocation, `ptr`, belonging to `self`.  Never fails.
    ///
    /// ### Safety
    /// *   `ptr` must belong to `self`
    /// *   `ptr` will no longer be accessible after free
    /// *   `layout` must exactly match the [`Layout`] used to allocate `ptr`
    unsafe fn free(&self, ptr: AllocNN, layout: Layout);
}



#[allow(clippy::undocumented_unsafe_blocks)] // SAFETY: ✔️ same trait, same prereqs
unsafe impl<'a, A: Alloc> Alloc for &'a A {
    fn alloc_uninit(&self, layout: Layout) -> Result<AllocNN,  Self::Error> { A::alloc_uninit(self, layout) }
    fn alloc_zeroed(&self, layout: Layout) -> Result<AllocNN0, Self::Error> { A::alloc_zeroed(self, layout) }
}

#[allow(clippy::undocumented_unsafe_blocks)] // SAFETY: ✔️ same trait, same prereqs
unsafe impl<'a, A: Free> Free for &'a A {
    unsafe fn free(&self, ptr: AllocNN, layout: Layout) { unsafe { A::free(self, ptr, layout) } }
}



/// Testing functions to verify implementations of [`fat`] traits.
#[cfg(any(feature = "std", test))] pub mod test {
    use super::*;

    /// Assert that `A` returns allocations aligned to every alignment up to [`Meta::MAX_ALIGN`](meta::Meta::MAX_ALIGN) (capped at 4 KiB).
    #[track_caller] pub fn alignment<A: Alloc + Free>(allocator: A) {
        let mut align = ALIGN_1;
        loop {
            let layout = Layout::from_size_align(align.as_usize(), align.as_usize()).expect("valid layout");
            if let Ok(alloc) = allocator.alloc_uninit(layout) {
                assert_eq!(alloc.as_ptr() as usize % align.as_usize(), 0, "allocation not aligned to {align:?}");
                // SAFETY: ✔️ just allocated with `layout`
                unsafe { allocator.free(alloc, layout) };
            }
            if align >= A::MAX_ALIGN || align.as_usize() >= 4096 { break }
            align = Alignment::new(align.as_usize() * 2).expect("power of two");
        }
    }

    /// Assert that `A` rejects sizes it documents as unsupported, and survives a spread of small odd sizes.
    #[track_caller] pub fn edge_case_sizes<A: Alloc + Free>(allocator: A) {
        for size in [1, 2, 3, 7, 8, 9, 15, 16, 17, 255, 256, 4095, 4096, 4097] {
            let layout = Layout::from_size_align(size, 1).expect("valid layout");
            if let Ok(alloc) = allocator.alloc_uninit(layout) {
                // SAFETY: ✔️ `alloc` is valid for `size` bytes
                unsafe { alloc.as_ptr().write_bytes(0xA5, size) };
                // SAFETY: ✔️ just allocated with `layout`
                unsafe { allocator.free(alloc, layout) };
            }
        }

        if A::MAX_SIZE < isize::MAX as usize {
            let layout = Layout::from_size_align(A::MAX_SIZE + 1, 1).expect("valid layout");
            assert!(allocator.alloc_uninit(layout).is_err(), "allocation beyond MAX_SIZE succeeded");
        }
    }

    /// Assert that [`Alloc::alloc_zeroed`] really zeroes.
    #[track_caller] pub fn zeroed_alloc<A: Alloc + Free>(allocator: A) {
        for size in [1, 8, 64, 1000] {
            let layout = Layout::from_size_align(size, 1).expect("valid layout");
            let Ok(alloc) = allocator.alloc_zeroed(layout) else { continue };
            // SAFETY: ✔️ `alloc` is valid and initialized for `size` bytes
            let bytes = unsafe { core::slice::from_raw_parts(alloc.as_ptr(), size) };
            assert!(bytes.iter().all(|b| *b == 0), "alloc_zeroed returned nonzero bytes");
            // SAFETY: ✔️ just allocated with `layout`
            unsafe { allocator.free(alloc.cast(), layout) };
        }
    }
}
