//! [`Error`] and the individual failure types it wraps

use crate::util;

use core::alloc::Layout;
use core::fmt::{self, Debug, Display, Formatter};



/// The allocator couldn't satisfy a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)] pub struct OutOfMemoryError {
    pub requested: Layout,
}

/// More elements were requested than can be represented in a single allocation.
///
/// Raised *before* the allocator is ever asked for memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)] pub struct ExcessiveSliceRequestedError {
    pub requested:  usize,
    pub max:        usize,
}

/// A checked index was not less than the number of live elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)] pub struct OutOfBoundsError {
    pub index:  usize,
    pub len:    usize,
}

/// Any failure reported by a [`DArray`](crate::DArray) operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)] pub enum Error {
    OutOfMemory(OutOfMemoryError),
    ExcessiveSliceRequested(ExcessiveSliceRequestedError),
    OutOfBounds(OutOfBoundsError),
}

impl Error {
    pub fn is_out_of_memory(&self) -> bool { matches!(self, Error::OutOfMemory(_)) }
    pub fn is_size_limit(&self) -> bool { matches!(self, Error::ExcessiveSliceRequested(_)) }
    pub fn is_out_of_bounds(&self) -> bool { matches!(self, Error::OutOfBounds(_)) }
}

impl Display for OutOfMemoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "out of memory: allocator refused {} with {:?} alignment", util::bytes::Pretty(self.requested.size()), crate::Alignment::from(self.requested))
    }
}

impl Display for ExcessiveSliceRequestedError { fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { write!(f, "requested {} elements, but a maximum of {} is supported", self.requested, self.max) } }
impl Display for OutOfBoundsError { fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { write!(f, "index {} is out of range for length {}", self.index, self.len) } }

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfMemory(e)               => Display::fmt(e, f),
            Error::ExcessiveSliceRequested(e)   => Display::fmt(e, f),
            Error::OutOfBounds(e)               => Display::fmt(e, f),
        }
    }
}

impl From<OutOfMemoryError>             for Error { fn from(e: OutOfMemoryError            ) -> Self { Error::OutOfMemory(e) } }
impl From<ExcessiveSliceRequestedError> for Error { fn from(e: ExcessiveSliceRequestedError) -> Self { Error::ExcessiveSliceRequested(e) } }
impl From<OutOfBoundsError>             for Error { fn from(e: OutOfBoundsError            ) -> Self { Error::OutOfBounds(e) } }

#[cfg(feature = "std")] impl std::error::Error for OutOfMemoryError {}
#[cfg(feature = "std")] impl std::error::Error for ExcessiveSliceRequestedError {}
#[cfg(feature = "std")] impl std::error::Error for OutOfBoundsError {}
#[cfg(feature = "std")] impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::OutOfMemory(e)               => Some(e),
            Error::ExcessiveSliceRequested(e)   => Some(e),
            Error::OutOfBounds(e)               => Some(e),
        }
    }
}

#[cfg(feature = "std")] impl From<Error> for std::io::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::OutOfMemory(_)               => std::io::Error::from(std::io::ErrorKind::OutOfMemory),
            Error::ExcessiveSliceRequested(_)   => std::io::Error::from(std::io::ErrorKind::OutOfMemory),
            Error::OutOfBounds(_)               => std::io::Error::from(std::io::ErrorKind::InvalidInput),
        }
    }
}



#[test] fn display() {
    use std::string::ToString;
    let e = Error::from(OutOfBoundsError { index: 7, len: 5 });
    assert_eq!(e.to_string(), "index 7 is out of range for length 5");
    assert!(e.is_out_of_bounds());

    let e = Error::from(ExcessiveSliceRequestedError { requested: 10, max: 4 });
    assert_eq!(e.to_string(), "requested 10 elements, but a maximum of 4 is supported");
    assert!(e.is_size_limit());

    let e = Error::from(OutOfMemoryError { requested: Layout::new::<[u64; 4]>() });
    assert_eq!(e.to_string(), "out of memory: allocator refused 32 B with 8 B alignment");
}
