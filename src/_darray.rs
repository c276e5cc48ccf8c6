#![doc = include_str!("../Readme.md")]
#![no_std]

#![forbid(unreachable_patterns)] // often indicates e.g. a typoed "constant" in a match statement
#![forbid(unsafe_op_in_unsafe_fn)]
#![deny(non_snake_case)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![allow(clippy::let_unit_value)] // very common for const assertions
#![cfg_attr(not(feature = "default"), allow(dead_code, unused_imports))] // suppress noisy "dead code" warnings in non-default build configs

#[cfg(any(feature = "alloc", test))] extern crate alloc;
#[cfg(any(feature = "std",   test))] extern crate std;

type AllocNN    = core::ptr::NonNull<core::mem::MaybeUninit<u8>>;
type AllocNN0   = core::ptr::NonNull<u8>;



pub use align::Alignment;
#[doc(hidden)] pub use align::{ALIGN_1, ALIGN_8, ALIGN_16};
mod align;

#[path = "allocator/_allocator.rs"      ] pub mod allocator;
#[path = "array/_array.rs"              ] pub mod array;
#[path = "traits/_traits.rs"            ] pub mod traits; #[doc(hidden)] pub use traits::*;
#[path = "util/_util.rs"                ] mod util;

#[doc(hidden)] pub mod bug;
pub mod error;

pub use array::DArray;
#[cfg(any(feature = "alloc", test))] pub use array::GlobalArray;
