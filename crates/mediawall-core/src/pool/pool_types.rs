//! Pool settings and apply results.

use mediawall_config::{Config, GeometryConfig, SearchAppConfig, TimingConfig, WALL_SLOTS};

use crate::error::WallError;
use crate::geometry::ScreenSize;

/// What `ensure_pool` had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolState {
    /// Four live windows were already up.
    Reused,
    /// The pool was (re)created from scratch.
    Rebuilt,
}

/// Everything the pool needs besides a launcher.
#[derive(Debug, Clone, Default)]
pub struct PoolSettings {
    pub screen: ScreenSize,
    pub geometry: GeometryConfig,
    pub timing: TimingConfig,
    pub search_app: SearchAppConfig,
}

impl PoolSettings {
    pub fn from_config(config: &Config, screen: ScreenSize) -> Self {
        Self {
            screen,
            geometry: config.geometry,
            timing: config.timing.clone(),
            search_app: config.search_app.clone(),
        }
    }
}

/// Outcome of one slot within an apply.
#[derive(Debug)]
pub struct SlotReport {
    pub slot: usize,
    pub query: String,
    pub error: Option<WallError>,
}

impl SlotReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-slot outcomes of one `apply_preset` call.
#[derive(Debug)]
pub struct ApplyReport {
    pub preset: String,
    pub slots: Vec<SlotReport>,
    /// Slots the audio policy muted.
    pub muted: Vec<usize>,
}

impl ApplyReport {
    pub fn new(preset: impl Into<String>) -> Self {
        Self {
            preset: preset.into(),
            slots: Vec::with_capacity(WALL_SLOTS),
            muted: Vec::new(),
        }
    }

    /// Every slot was applied. Partial application counts as failure.
    pub fn is_success(&self) -> bool {
        self.slots.len() == WALL_SLOTS && self.slots.iter().all(SlotReport::is_ok)
    }

    pub fn failures(&self) -> impl Iterator<Item = &SlotReport> {
        self.slots.iter().filter(|s| !s.is_ok())
    }

    pub fn first_failure(&self) -> Option<&WallError> {
        self.failures().find_map(|s| s.error.as_ref())
    }

    /// A slot failed because its browser session died.
    pub fn lost_session(&self) -> bool {
        self.failures()
            .any(|s| s.error.as_ref().is_some_and(WallError::is_session_lost))
    }

    /// One-line, caller-facing description of the outcome.
    pub fn summary(&self) -> String {
        match self.first_failure() {
            None => format!("Showing preset '{}'", self.preset),
            Some(first) => format!(
                "Preset '{}' failed in {} of {} slots: {}",
                self.preset,
                self.failures().count(),
                WALL_SLOTS,
                first
            ),
        }
    }
}
