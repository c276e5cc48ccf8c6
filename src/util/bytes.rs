//! Human readable byte counts

use core::fmt::{self, Debug, Display, Formatter};
use core::ops::ShrAssign;



/// Pretty print `v` bytes as e.g. "16 KiB".  Values are only scaled while they divide evenly, so no precision is lost.
pub fn pretty<T: Copy + Display + From<u16> + Ord + ShrAssign + core::ops::BitAnd<Output = T>>(f: &mut Formatter<'_>, mut v: T) -> fmt::Result {
    let zero  = T::from(0);
    let limit = T::from(8192);
    let mask  = T::from(1023);
    let shr   = T::from(10);

    for unit in ["B", "KiB", "MiB", "GiB", "TiB", "PiB"] {
        if v <= limit || (v & mask) != zero { return write!(f, "{v} {unit}"); }
        v >>= shr;
    }
    write!(f, "{v} EiB")
}

/// Pretty print `self.0` bytes
#[derive(Clone, Copy)] pub struct Pretty<T>(pub T);
impl<T: Copy + Display + From<u16> + Ord + ShrAssign + core::ops::BitAnd<Output = T>> Debug   for Pretty<T> { fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { pretty(f, self.0) } }
impl<T: Copy + Display + From<u16> + Ord + ShrAssign + core::ops::BitAnd<Output = T>> Display for Pretty<T> { fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { pretty(f, self.0) } }



#[test] fn units() {
    use std::format;
    assert_eq!(format!("{}", Pretty(0_usize)),          "0 B");
    assert_eq!(format!("{}", Pretty(8192_usize)),       "8192 B");
    assert_eq!(format!("{}", Pretty(16384_usize)),      "16 KiB");
    assert_eq!(format!("{}", Pretty(16385_usize)),      "16385 B");
    assert_eq!(format!("{}", Pretty(64_usize << 20)),   "64 MiB");
}
