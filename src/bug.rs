//! Bug reporting panics

use core::ffi::c_void;
use core::mem::MaybeUninit;
use core::ptr::NonNull;



pub trait AsPtr : Copy                  { fn as_ptr(self) -> *mut c_void; }
impl AsPtr for *mut    MaybeUninit<u8>  { fn as_ptr(self) -> *mut c_void { self.cast() } }
impl AsPtr for NonNull<MaybeUninit<u8>> { fn as_ptr(self) -> *mut c_void { self.as_ptr().cast() } }
impl AsPtr for NonNull<            u8 > { fn as_ptr(self) -> *mut c_void { self.as_ptr().cast() } }

/// Report bugs that indicate Undefined Behavior
pub mod ub {
    use super::*;

    #[track_caller] #[inline(never)] pub fn invalid_ptr_for_allocator(ptr: impl AsPtr) -> ! {
        let ptr = ptr.as_ptr();
        panic!("bug: undefined behavior: {ptr:?} doesn't belong to this allocator");
    }

    #[track_caller] #[inline(never)] pub fn freed_ptr_for_allocator(ptr: impl AsPtr) -> ! {
        let ptr = ptr.as_ptr();
        panic!("bug: undefined behavior: {ptr:?} belongs to this allocator, but every allocation it made was already freed");
    }
}

/// Report broken internal bookkeeping
pub mod invariant {
    #[track_caller] #[inline(never)] pub fn emplace_called_twice() -> ! {
        panic!("bug: emplace constructs exactly one element, but its constructor was requested twice");
    }

    #[track_caller] #[inline(never)] pub fn insert_failed_after_consuming_value() -> ! {
        panic!("bug: insertion reported failure after its value had already been moved into place");
    }
}
