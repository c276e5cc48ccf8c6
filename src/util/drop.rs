#![cfg(test)]
//! [`Probe`]: an element type that counts its own lifetime events and can be told to fail.

use core::cell::Cell;
use core::marker::PhantomData;



std::thread_local! {
    static CONSTRUCTED  : Cell<usize>           = const { Cell::new(0) };
    static DESTROYED    : Cell<usize>           = const { Cell::new(0) };
    static FAIL_IN      : Cell<Option<usize>>   = const { Cell::new(None) };
}

/// Test element.  Every [`Probe::new`], [`Default::default`] and [`Clone::clone`] counts as a construction, every drop as
/// a destruction.  Counters are per-thread, and each `#[test]` runs on its own thread.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)] pub struct Probe {
    id:         i32,
    _phantom:   PhantomData<*const ()>, // !Send: counters are thread local
}

impl Probe {
    pub fn new(id: i32) -> Self { Self::count(); Self { id, _phantom: PhantomData } }
    pub fn id(&self) -> i32 { self.id }

    /// Zero all counters and disarm any pending failure.
    pub fn reset() {
        CONSTRUCTED.with(|c| c.set(0));
        DESTROYED.with(|c| c.set(0));
        FAIL_IN.with(|c| c.set(None));
    }

    /// Make the `n`th fallible construction (`default` or `clone`) from now on panic.  `n == 1` fails the very next one.
    pub fn fail_on_nth(n: usize) { assert!(n > 0); FAIL_IN.with(|c| c.set(Some(n))) }

    pub fn constructed()    -> usize { CONSTRUCTED.with(Cell::get) }
    pub fn destroyed()      -> usize { DESTROYED.with(Cell::get) }
    pub fn live()           -> usize { Self::constructed() - Self::destroyed() }

    fn count() { CONSTRUCTED.with(|c| c.set(c.get() + 1)) }

    fn fallible(what: &str, id: i32) {
        let fail = FAIL_IN.with(|c| match c.get() {
            Some(1) => { c.set(None); true },
            Some(n) => { c.set(Some(n-1)); false },
            None    => false,
        });
        if fail { panic!("Probe: {what} construction of id {id} failed on request") }
        Self::count();
    }
}

impl Default for Probe {
    fn default() -> Self { Self::fallible("default", 0); Self { id: 0, _phantom: PhantomData } }
}

impl Clone for Probe {
    fn clone(&self) -> Self { Self::fallible("copy", self.id); Self { id: self.id, _phantom: PhantomData } }
}

impl Drop for Probe {
    fn drop(&mut self) {
        DESTROYED.with(|c| c.set(c.get() + 1));
        assert!(Self::destroyed() <= Self::constructed(), "more Probes destroyed than constructed: a Probe was presumably dropped twice");
    }
}

/// Run `f`, expecting it to panic (e.g. because a [`Probe`] was told to fail).
#[track_caller] pub fn expect_panic<R>(f: impl FnOnce() -> R) {
    let r = std::panic::catch_unwind(core::panic::AssertUnwindSafe(f));
    assert!(r.is_err(), "expected a panic");
}



#[test] fn counters() {
    Probe::reset();
    let a = Probe::new(1);
    let b = a.clone();
    assert_eq!(b.id(), 1);
    assert_eq!(Probe::live(), 2);
    Probe::fail_on_nth(2);
    let c = Probe::default();
    expect_panic(|| a.clone());
    let _d = a.clone(); // disarmed after firing
    drop((a, b, c));
    assert_eq!(Probe::constructed(), 4);
    assert_eq!(Probe::live(), 1);
}
