#![cfg(feature = "std")]

use crate::array::DArray;
use crate::fat::*;

use std::io::*;



impl<A: Alloc + Free> Write for DArray<u8, A> {
    fn flush(&mut self) -> Result<()> { Ok(()) }
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.try_extend_from_slice(buf)?;
        Ok(buf.len())
    }
}



#[test] fn write_fmt() {
    use crate::GlobalArray;
    let mut a = GlobalArray::<u8>::new();
    write!(a, "{}-{}", 12, "ab").unwrap();
    assert_eq!(a, *b"12-ab");
}

#[test] fn write_out_of_memory() {
    use crate::allocator::debug::Null;
    let mut a = DArray::<u8, Null>::new();
    let e = a.write(b"x").unwrap_err();
    assert_eq!(e.kind(), ErrorKind::OutOfMemory);
}
