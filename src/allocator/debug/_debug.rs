//! [`Null`], [`FaultInjector`]

mod null;           pub use null::Null;
mod fault_injector; #[cfg(any(feature = "alloc", test))] pub use fault_injector::FaultInjector;
