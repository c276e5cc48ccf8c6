//! Placement construction and destruction of element runs

use core::mem::ManuallyDrop;



/// Destroys `[start, start+built)` in reverse unless [`finish`](Self::finish)ed.
///
/// Covers both early returns (`?`) and unwinding out of a constructor.
struct RunGuard<T> {
    start:  *mut T,
    built:  usize,
}

impl<T> RunGuard<T> {
    fn finish(self) -> usize { ManuallyDrop::new(self).built }
}

impl<T> Drop for RunGuard<T> {
    fn drop(&mut self) {
        // SAFETY: ✔️ exactly `built` elements were written from `start` and nothing else owns them
        unsafe { destroy_run(self.start, self.built) }
    }
}

/// Construct `n` elements at `dst`, the `k`th from `f(k)`.
///
/// If `f` fails or panics at `k`, the `k` elements already built are destroyed (last first) and nothing survives.
///
/// ### Safety
/// *   `dst[..n]` must be valid for writes and hold nothing that needs dropping
pub(super) unsafe fn construct_with<T, E>(dst: *mut T, n: usize, mut f: impl FnMut(usize) -> Result<T, E>) -> Result<(), E> {
    let mut run = RunGuard { start: dst, built: 0 };
    while run.built < n {
        let value = f(run.built)?;
        // SAFETY: ✔️ `built < n`, `dst[..n]` is writeable per fn preconditions
        unsafe { dst.add(run.built).write(value) };
        run.built += 1;
    }
    let built = run.finish();
    debug_assert_eq!(built, n);
    Ok(())
}

/// Destroy `start[..n]`, last element first.
///
/// ### Safety
/// *   `start[..n]` must be initialized, and must not be accessed as initialized afterwards
pub(super) unsafe fn destroy_run<T>(start: *mut T, n: usize) {
    if !core::mem::needs_drop::<T>() { return }
    for i in (0..n).rev() {
        // SAFETY: ✔️ `i < n`, initialized per fn preconditions
        unsafe { start.add(i).drop_in_place() };
    }
}



#[cfg(test)] use crate::util::drop::{Probe, expect_panic};

#[test] fn destroy_reverse_order() {
    use core::cell::RefCell;
    use std::vec::Vec;
    struct Logged<'a>(u32, &'a RefCell<Vec<u32>>);
    impl Drop for Logged<'_> { fn drop(&mut self) { self.1.borrow_mut().push(self.0) } }

    let log = RefCell::new(Vec::new());
    let mut slots = core::mem::MaybeUninit::<[Logged; 4]>::uninit();
    let dst = slots.as_mut_ptr().cast::<Logged>();
    unsafe { construct_with::<_, ()>(dst, 4, |k| Ok(Logged(k as u32, &log))) }.unwrap();
    unsafe { destroy_run(dst, 4) };
    assert_eq!(*log.borrow(), [3, 2, 1, 0]);
}

#[test] fn error_unwinds_partial_run() {
    Probe::reset();
    let mut slots = core::mem::MaybeUninit::<[Probe; 5]>::uninit();
    let dst = slots.as_mut_ptr().cast::<Probe>();
    let r = unsafe { construct_with(dst, 5, |k| if k == 3 { Err("refused") } else { Ok(Probe::new(k as i32)) }) };
    assert_eq!(r, Err("refused"));
    assert_eq!(Probe::constructed(), 3);
    assert_eq!(Probe::live(), 0);
}

#[test] fn panic_unwinds_partial_run() {
    Probe::reset();
    let proto = Probe::new(7);
    let mut slots = core::mem::MaybeUninit::<[Probe; 5]>::uninit();
    let dst = slots.as_mut_ptr().cast::<Probe>();
    Probe::fail_on_nth(4);
    expect_panic(|| unsafe { construct_with::<_, ()>(dst, 5, |_| Ok(proto.clone())) });
    assert_eq!(Probe::constructed(), 4);
    assert_eq!(Probe::live(), 1);
}
