//! # MediaWall Core
//!
//! Window orchestration engine: owns a pool of exactly four browser
//! sessions, maps a preset onto them and enforces the audio policy.
//!
//! ## Flow
//!
//! ```text
//! preset name ─► PresetCatalog ─► SessionPool::ensure_pool ─► SessionPool::apply_preset
//!                                      │                            │
//!                               GeometryPlanner              ContentDriver ─► AudioPolicy
//! ```
//!
//! The engine drives browsers only through the [`WallSession`] and
//! [`SessionLauncher`] traits; the Chrome backend lives in a separate crate.

pub mod audio;
pub mod catalog;
pub mod controller;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod pool;
pub mod session;
pub mod worker;

#[cfg(test)]
pub(crate) mod testing;

pub use audio::AudioPolicy;
pub use catalog::{ContentItem, ContentKind, Preset, PresetCatalog};
pub use controller::{CommandOutcome, MediaWall};
pub use driver::{ContentDriver, ElementState};
pub use error::{StepError, WallError};
pub use geometry::{GeometryPlanner, Rect, ScreenSize};
pub use pool::{ApplyReport, PoolSettings, PoolState, SessionPool, SlotReport};
pub use session::{LaunchSpec, SessionLauncher, WallSession};
pub use worker::{WallCommand, WallHandle, WallWorker};

pub use mediawall_config::WALL_SLOTS;
