use crate::array::DArray;
use crate::fat::*;



impl<T, A: Free + Default> Default for DArray<T, A> { fn default() -> Self { Self::new() } }

// Don't bother with `try_default` / `default_in`: these would just alias `new` / `new_in`
