//! Session pool: the four wall windows and everything that touches them.
//!
//! The pool is either empty or full. Any partial or dead state found by the
//! liveness probe is resolved by tearing every window down and launching
//! four fresh ones; individual windows are never repaired in place.

mod pool_core;
mod pool_types;

pub use pool_core::SessionPool;
pub use pool_types::{ApplyReport, PoolSettings, PoolState, SlotReport};

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
