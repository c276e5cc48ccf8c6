//! Allocator implementations
//!
//! | Allocator                     | Feature   | Backed by |
//! | ------------------------------| ----------| ----------|
//! | [`alloc::Global`]             | `alloc`   | Rust's global allocator
//! | [`c::Malloc`]                 | `c`       | `malloc` / `calloc` / `free`
//! | [`debug::Null`]               |           | nothing: every allocation fails
//! | [`debug::FaultInjector`]      | `alloc`   | [`alloc::Global`], failing on request and counting every call

#[path = "alloc/_alloc.rs"  ] pub mod alloc;
#[path = "c/_c.rs"          ] pub mod c;
#[path = "debug/_debug.rs"  ] pub mod debug;
