//! Allocator capability traits
//!
//! | Trait         | Provides |
//! | --------------| ---------|
//! | [`meta::Meta`]| error type, maximum alignment, maximum size
//! | [`fat::Alloc`]| <code>alloc_uninit(layout) -> Result&lt;NonNull&lt;_&gt;, _&gt;</code>
//! | [`fat::Free`] | <code>free(ptr, layout)</code>

pub mod fat;
pub mod meta;
