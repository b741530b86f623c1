//! A launched Chrome window as seen by the engine.

use std::path::PathBuf;

use async_trait::async_trait;
use mediawall_core::{StepError, WallSession};
use serde_json::Value;
use tokio::process::Child;
use tracing::{debug, info};

use crate::cdp::{CdpClient, PageSession};

/// User-data directory of one window.
#[derive(Debug, Clone)]
pub(crate) struct SlotProfile {
    pub dir: PathBuf,
    /// A per-run copy that is deleted on teardown.
    pub temporary: bool,
}

impl SlotProfile {
    pub(crate) async fn cleanup(&self) {
        if !self.temporary {
            return;
        }
        if let Err(e) = tokio::fs::remove_dir_all(&self.dir).await {
            debug!("Could not remove profile {}: {}", self.dir.display(), e);
        }
    }
}

/// One wall window: a Chrome process, its DevTools connection and the
/// attached page.
pub struct ChromeSession {
    slot: usize,
    client: CdpClient,
    page: PageSession,
    process: Option<Child>,
    profile: SlotProfile,
}

impl std::fmt::Debug for ChromeSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChromeSession")
            .field("slot", &self.slot)
            .field("target_id", &self.page.target_id())
            .field("pid", &self.process.as_ref().and_then(Child::id))
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}

impl ChromeSession {
    pub(crate) fn new(
        slot: usize,
        client: CdpClient,
        page: PageSession,
        process: Child,
        profile: SlotProfile,
    ) -> Self {
        Self {
            slot,
            client,
            page,
            process: Some(process),
            profile,
        }
    }

    pub fn page(&self) -> &PageSession {
        &self.page
    }

    pub fn pid(&self) -> Option<u32> {
        self.process.as_ref().and_then(Child::id)
    }
}

#[async_trait]
impl WallSession for ChromeSession {
    fn slot(&self) -> usize {
        self.slot
    }

    async fn current_url(&self) -> Result<String, StepError> {
        Ok(self.page.get_url().await?)
    }

    async fn navigate(&self, url: &str) -> Result<(), StepError> {
        self.page.navigate(url).await?;
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> Result<Value, StepError> {
        Ok(self.page.evaluate(script).await?)
    }

    async fn click_at(&self, x: f64, y: f64) -> Result<(), StepError> {
        Ok(self.page.click(x, y).await?)
    }

    async fn insert_text(&self, text: &str) -> Result<(), StepError> {
        Ok(self.page.type_text(text).await?)
    }

    async fn press_key(&self, key: &str) -> Result<(), StepError> {
        Ok(self.page.press_key(key).await?)
    }

    async fn press_key_combo(&self, combo: &str) -> Result<(), StepError> {
        Ok(self.page.press_key_combo(combo).await?)
    }

    async fn shutdown(&mut self) -> Result<(), StepError> {
        if let Err(e) = self.client.close_browser().await {
            debug!(slot = self.slot, "Browser.close failed: {}", e);
        }

        if let Some(mut child) = self.process.take() {
            // Browser.close usually wins; kill covers a hung renderer.
            if let Err(e) = child.kill().await {
                debug!(slot = self.slot, "Kill failed: {}", e);
            }
        }

        self.profile.cleanup().await;
        info!(slot = self.slot, "Chrome window closed");
        Ok(())
    }
}
