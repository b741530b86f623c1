//! # MediaWall Chrome backend
//!
//! Implements the engine's [`SessionLauncher`](mediawall_core::SessionLauncher)
//! and [`WallSession`](mediawall_core::WallSession) traits with one Chrome
//! process per wall slot, each driven over its own DevTools connection.
//!
//! - [`cdp`]: DevTools Protocol client and page session
//! - [`ChromeLauncher`]: process launch, readiness polling and window placement
//! - [`ChromeSession`]: a launched window as seen by the engine
//! - [`ProfileCloner`]: best-effort copy of a signed-in Chrome profile

pub mod cdp;
mod launcher;
mod profile;
mod session;

pub use launcher::{ChromeLauncher, LaunchError};
pub use profile::ProfileCloner;
pub use session::ChromeSession;
