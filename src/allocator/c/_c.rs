#![cfg(feature = "c")]
//! [`Malloc`]
//!
//! | Rust                          | C         |
//! | ------------------------------| ----------|
//! | [`fat::Alloc::alloc_uninit`]  | [`malloc`](https://en.cppreference.com/w/c/memory/malloc) |
//! | [`fat::Alloc::alloc_zeroed`]  | [`calloc`](https://en.cppreference.com/w/c/memory/calloc) |
//! | [`fat::Free::free`]           | [`free`](https://en.cppreference.com/w/c/memory/free) |

#[cfg(doc)] use crate::*;

mod malloc;         pub use malloc::Malloc;
