//! Browser session seams.
//!
//! The engine never touches a browser directly: a [`SessionLauncher`] creates
//! one [`WallSession`] per slot and the pool owns it until teardown.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{StepError, WallError};
use crate::geometry::Rect;

/// Everything a launcher needs to open one wall window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub slot: usize,
    /// Planned window rectangle.
    pub bounds: Rect,
    /// First page the window shows, so it never flashes about:blank.
    pub start_url: String,
    /// Start with audio muted.
    pub muted: bool,
}

/// A live, automatable browser window bound to one slot.
#[async_trait]
pub trait WallSession: Send + Sync {
    /// Slot this session was launched for.
    fn slot(&self) -> usize;

    /// Current document address. Doubles as the liveness probe.
    async fn current_url(&self) -> Result<String, StepError>;

    /// Navigate and wait for the document to load.
    async fn navigate(&self, url: &str) -> Result<(), StepError>;

    /// Evaluate a script in the page and return its JSON value.
    async fn evaluate(&self, script: &str) -> Result<Value, StepError>;

    /// Left-click at viewport coordinates.
    async fn click_at(&self, x: f64, y: f64) -> Result<(), StepError>;

    /// Insert text into the focused element.
    async fn insert_text(&self, text: &str) -> Result<(), StepError>;

    /// Press and release a single key.
    async fn press_key(&self, key: &str) -> Result<(), StepError>;

    /// Press a key combination such as `Control+a`.
    async fn press_key_combo(&self, combo: &str) -> Result<(), StepError>;

    /// Close the window and release its browser process.
    async fn shutdown(&mut self) -> Result<(), StepError>;
}

/// Creates wall sessions.
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    async fn launch(&self, spec: LaunchSpec) -> Result<Box<dyn WallSession>, WallError>;
}
