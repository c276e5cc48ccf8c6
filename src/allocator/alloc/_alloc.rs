#![cfg(any(feature = "alloc", test))]
//! [`Global`]

mod global;         pub use global::Global;
