//! Chrome DevTools Protocol (CDP) client.
//!
//! Each wall window gets its own Chrome process and therefore its own
//! [`CdpClient`]. The client talks to the browser-level websocket; page
//! commands go through a [`PageSession`] attached to the window's target
//! with flattened session ids.

mod client;
mod error;
mod protocol;
mod session;

pub use client::{browser_version, list_targets, CdpClient};
pub use error::CdpError;
pub use protocol::*;
pub use session::PageSession;
