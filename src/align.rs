//! [`Alignment`]

use crate::util;

use core::alloc::Layout;
use core::fmt::{self, Debug, Formatter};
use core::num::NonZeroUsize;



/// A valid [`Layout`] alignment (a power of 2)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)] #[repr(transparent)] pub struct Alignment(NonZeroUsize);

impl Alignment {
    #[track_caller] pub(crate) const fn constant(align: usize) -> Self { match Self::new(align) { Some(a) => a, None => panic!("Alignment::constant(align): invalid constant") } }

    /// Returns [`None`] unless `align` is a valid power of 2 (which also implies nonzero)
    pub const fn new(align: usize) -> Option<Self> {
        match NonZeroUsize::new(align) {
            Some(nz) if nz.is_power_of_two() => Some(Self(nz)),
            _ => None,
        }
    }

    /// Returns the [`Alignment`] of `T`.
    pub const fn of<T>() -> Self { Self::constant(core::mem::align_of::<T>()) }

    /// Returns the alignment as a [`usize`]
    pub const fn as_usize   (self) -> usize         { self.0.get() }

    /// Returns the alignment as a [`NonZeroUsize`]
    pub const fn as_nonzero (self) -> NonZeroUsize  { self.0 }

    /// Minimum representable alignment (e.g. `1`)
    pub const MIN : Alignment = ALIGN_1;

    /// Maximum representable alignment (2<sup>63</sup> B on 64-bit, 2 GiB on 32-bit)
    pub const MAX : Alignment = Alignment::constant(usize::MAX/2+1);
}

impl From<Layout   > for Alignment      { fn from(value: Layout   ) -> Self { Self::constant(value.align()) } }
impl From<Alignment> for usize          { fn from(align: Alignment) -> Self { align.as_usize()   } }
impl From<Alignment> for NonZeroUsize   { fn from(align: Alignment) -> Self { align.as_nonzero() } }

impl Debug for Alignment { fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { util::bytes::pretty(f, self.as_usize()) } }

#[doc(hidden)] pub const ALIGN_1  : Alignment = Alignment::constant(1);
#[doc(hidden)] pub const ALIGN_8  : Alignment = Alignment::constant(8);
#[doc(hidden)] pub const ALIGN_16 : Alignment = Alignment::constant(16);



#[test] fn powers_of_two_only() {
    assert!(Alignment::new(0).is_none());
    assert!(Alignment::new(3).is_none());
    assert_eq!(Alignment::new(64).map(Alignment::as_usize), Some(64));
    assert_eq!(Alignment::of::<u64>().as_usize(), core::mem::align_of::<u64>());
    assert_eq!(Alignment::MAX.as_usize(), usize::MAX/2+1);
}
