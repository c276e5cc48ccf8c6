pub mod bytes;
pub mod drop;
