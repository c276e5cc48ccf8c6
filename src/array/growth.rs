//! Amortized capacity growth

use crate::error::ExcessiveSliceRequestedError;



/// New capacity for a buffer of `cap` slots that must hold at least `required` (`> cap`), never exceeding `max`.
///
/// Doubles, or jumps straight to `required` if that's larger.  Once `cap` reaches half of `max` doubling could
/// overflow, so the next step is `max` itself.
pub(super) fn grown_capacity(cap: usize, required: usize, max: usize) -> Result<usize, ExcessiveSliceRequestedError> {
    debug_assert!(required > cap);
    if required > max {
        Err(ExcessiveSliceRequestedError { requested: required, max })
    } else if cap >= max/2 {
        Ok(max)
    } else {
        Ok(required.max(2 * cap))
    }
}



#[test] fn doubling() {
    let mut cap = 0;
    let mut seen = std::vec::Vec::new();
    for len in 0 .. 9 {
        if len + 1 > cap { cap = grown_capacity(cap, len + 1, 1000).unwrap() }
        seen.push(cap);
    }
    assert_eq!(seen, [1, 2, 4, 4, 8, 8, 8, 8, 16]);
}

#[test] fn required_beats_doubling() {
    assert_eq!(grown_capacity(4, 100, 1000), Ok(100));
    assert_eq!(grown_capacity(0, 7, 1000), Ok(7));
}

#[test] fn clamps_to_max() {
    assert_eq!(grown_capacity(500, 501, 1000), Ok(1000));
    assert_eq!(grown_capacity(499, 500, 1000), Ok(998));
    assert_eq!(grown_capacity(usize::MAX/2, usize::MAX/2 + 1, usize::MAX), Ok(usize::MAX));
    assert_eq!(grown_capacity(0, 1, 1), Ok(1));
}

#[test] fn size_limit() {
    assert_eq!(grown_capacity(10, 1001, 1000), Err(ExcessiveSliceRequestedError { requested: 1001, max: 1000 }));
}
