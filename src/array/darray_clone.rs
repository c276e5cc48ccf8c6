#![cfg(feature = "panicy-memory")]

use crate::array::DArray;
use crate::fat::*;



impl<T: Clone, A: Alloc + Free + Clone> Clone for DArray<T, A> {
    fn clone(&self) -> Self { self.try_clone().expect("out of memory") }
    fn clone_from(&mut self, source: &Self) { self.try_assign_from(source).expect("out of memory") }
}
