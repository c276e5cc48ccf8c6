//! [`DArray`]: a growable array that never leaves a half-finished state behind
//!
//! | Module            | Concern |
//! | ------------------| --------|
//! | `storage`         | the raw block: allocation, size limits, release
//! | `construct`       | building runs of elements, unwinding partial runs
//! | `transaction`     | build into a fresh block, swap it in on success
//! | `growth`          | amortized capacity growth
//! | `shift`           | opening and closing gaps for insertion and erasure

mod construct;
mod growth;
mod shift;
mod storage;
mod transaction;

mod darray;         pub use darray::DArray;
mod darray_clone;
mod darray_cmp;
mod darray_default;
mod darray_deref;
mod darray_extend;
mod darray_fmt;
mod darray_io;
mod darray_iter;    pub use darray_iter::IntoIter;
#[cfg(test)] mod darray_tests;

/// [`DArray`] using Rust's global allocator.
#[cfg(any(feature = "alloc", test))] pub type GlobalArray<T> = DArray<T, crate::allocator::alloc::Global>;
