//! MediaWall controller: the one object command handlers talk to.

use tracing::{info, warn};

use crate::catalog::{Preset, PresetCatalog};
use crate::error::WallError;
use crate::pool::{ApplyReport, SessionPool};

/// Caller-facing result of a command. Formatting is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub success: bool,
    pub message: String,
}

impl CommandOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Owns the preset catalog and the session pool.
pub struct MediaWall {
    catalog: PresetCatalog,
    pool: SessionPool,
}

impl MediaWall {
    pub fn new(catalog: PresetCatalog, pool: SessionPool) -> Self {
        Self { catalog, pool }
    }

    pub fn catalog(&self) -> &PresetCatalog {
        &self.catalog
    }

    pub fn pool(&self) -> &SessionPool {
        &self.pool
    }

    pub fn list_presets(&self) -> Vec<String> {
        self.catalog
            .list_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Show the named preset, collapsing the outcome to pass/fail.
    pub async fn show(&mut self, name: &str) -> CommandOutcome {
        match self.try_show(name).await {
            Ok(report) if report.is_success() => CommandOutcome::ok(report.summary()),
            Ok(report) => CommandOutcome::failed(report.summary()),
            Err(e) => {
                warn!(preset = name, kind = e.kind(), error = %e, "Show failed");
                CommandOutcome::failed(e.to_string())
            }
        }
    }

    /// Show the named preset and return the per-slot report.
    ///
    /// A lost session triggers one full rebuild and a second attempt.
    pub async fn try_show(&mut self, name: &str) -> Result<ApplyReport, WallError> {
        let preset = self.catalog.resolve(name)?.clone();

        match self.apply(&preset).await {
            Ok(report) if !report.lost_session() => Ok(report),
            Ok(_) | Err(WallError::SessionInvalid { .. }) => {
                info!(preset = name, "Session lost, rebuilding pool and retrying");
                self.pool.teardown().await;
                self.apply(&preset).await
            }
            Err(e) => Err(e),
        }
    }

    /// Close every window.
    pub async fn teardown(&mut self) -> CommandOutcome {
        match self.pool.teardown().await {
            0 => CommandOutcome::ok("No windows were open"),
            count => CommandOutcome::ok(format!("Closed {} windows", count)),
        }
    }

    async fn apply(&mut self, preset: &Preset) -> Result<ApplyReport, WallError> {
        self.pool.ensure_pool(preset).await?;
        self.pool.apply_preset(preset).await
    }
}
