//! Metadata traits common to all (de)allocators

use crate::*;

use core::fmt::Debug;



/// Allocator metadata (error type, max allocation size/alignment)
pub trait Meta {
    /// The error type returned from failed allocation.
    type Error : Debug;

    /// Indicates the maximum alignment this allocator should be expected to succeed in allocating.
    /// [`DArray`](crate::DArray) refuses to compile for element types more aligned than this.
    const MAX_ALIGN : Alignment;

    /// Indicates the maximum size this allocator should be expected to succeed in allocating.
    /// [`DArray::max_len`](crate::DArray::max_len) is derived from this.
    const MAX_SIZE : usize;
}

impl<'a, A: Meta> Meta for &'a A {
    type Error                      = A::Error;
    const MAX_ALIGN     : Alignment = A::MAX_ALIGN;
    const MAX_SIZE      : usize     = A::MAX_SIZE;
}



/// Allocator holds no per-instance state: any `A::default()` can free what any other instance allocated.
///
/// ### Safety
/// [`DArray::from_raw_parts`](crate::DArray::from_raw_parts) relies on this to rebind foreign allocations to a fresh allocator.
pub unsafe trait Stateless : Meta + Default {}
