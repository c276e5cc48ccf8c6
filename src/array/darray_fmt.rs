use crate::array::DArray;
use crate::fat::*;

use core::fmt::{self, Debug, Formatter};



impl<T: Debug, A: Free + Debug> Debug for DArray<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DArray")
            .field("allocator", self.allocator())
            .field("capacity", &self.capacity())
            .field("data", &self.as_slice())
        .finish()
    }
}



#[test] fn debug() {
    use crate::GlobalArray;
    use std::format;
    let mut a = GlobalArray::<u8>::new();
    a.try_reserve(4).unwrap();
    a.try_extend_from_slice(&[1, 2]).unwrap();
    assert_eq!(format!("{a:?}"), "DArray { allocator: Global, capacity: 4, data: [1, 2] }");
}
