//! SessionPool: launch, probe, apply and teardown.

use std::sync::Arc;

use mediawall_config::WALL_SLOTS;
use tracing::{debug, error, info, warn};

use crate::audio::AudioPolicy;
use crate::catalog::Preset;
use crate::driver::{settle, ContentDriver};
use crate::error::WallError;
use crate::geometry::{GeometryPlanner, ScreenSize};
use crate::session::{LaunchSpec, SessionLauncher, WallSession};

use super::{ApplyReport, PoolSettings, PoolState, SlotReport};

/// One bound slot.
pub(super) struct SlotSession {
    pub(super) session: Box<dyn WallSession>,
    /// Start URL, until the slot is first driven.
    pub(super) launch_url: Option<String>,
}

/// Owns the wall's four browser sessions.
///
/// Every operation takes `&mut self`: callers serialize access, typically
/// through [`WallWorker`](crate::worker::WallWorker).
pub struct SessionPool {
    launcher: Arc<dyn SessionLauncher>,
    planner: GeometryPlanner,
    screen: ScreenSize,
    driver: ContentDriver,
    pub(super) slots: Vec<SlotSession>,
}

impl SessionPool {
    pub fn new(launcher: Arc<dyn SessionLauncher>, settings: PoolSettings) -> Self {
        Self {
            launcher,
            planner: GeometryPlanner::new(settings.geometry),
            screen: settings.screen,
            driver: ContentDriver::new(settings.timing, settings.search_app),
            slots: Vec::with_capacity(WALL_SLOTS),
        }
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    /// Number of bound slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() == WALL_SLOTS
    }

    /// Make sure four live windows exist, rebuilding the pool if needed.
    ///
    /// Fresh windows open directly on the landing page for `preset`.
    /// On failure the pool is left empty.
    pub async fn ensure_pool(&mut self, preset: &Preset) -> Result<PoolState, WallError> {
        if self.is_full() {
            match self.probe().await {
                Ok(()) => {
                    debug!("All {} windows alive, reusing pool", WALL_SLOTS);
                    return Ok(PoolState::Reused);
                }
                Err(e) => warn!(error = %e, "Rebuilding pool"),
            }
        } else if !self.slots.is_empty() {
            warn!(bound = self.slots.len(), "Partial pool found, rebuilding");
        }

        self.teardown().await;
        self.launch_all(preset).await?;
        Ok(PoolState::Rebuilt)
    }

    /// Show `preset` on the wall.
    ///
    /// Slots are driven strictly in order. A failed slot does not stop the
    /// remaining ones, but any failure makes the whole report a failure and
    /// skips the audio policy. A dead session found by the up-front probe
    /// discards the whole pool and returns [`WallError::SessionInvalid`].
    pub async fn apply_preset(&mut self, preset: &Preset) -> Result<ApplyReport, WallError> {
        if !self.is_full() {
            return Err(WallError::PoolEmpty);
        }

        if let Err(e) = self.probe().await {
            warn!(error = %e, "Discarding pool before apply");
            self.teardown().await;
            return Err(e);
        }

        info!(preset = preset.name(), "Applying preset");
        let mut report = ApplyReport::new(preset.name());

        for (slot, item) in preset.items().iter().enumerate() {
            let entry = &mut self.slots[slot];
            let launched_at = entry.launch_url.take();
            let result = self
                .driver
                .apply(entry.session.as_ref(), item, launched_at.as_deref())
                .await;

            if let Err(e) = &result {
                error!(slot, kind = e.kind(), error = %e, "Slot failed");
            }
            report.slots.push(SlotReport {
                slot,
                query: item.query.clone(),
                error: result.err(),
            });
        }

        if !report.is_success() {
            return Ok(report);
        }

        for (slot, entry) in self.slots.iter().enumerate() {
            if AudioPolicy::is_audible(slot) {
                continue;
            }
            match AudioPolicy::mute_all_media(entry.session.as_ref()).await {
                Ok(_) => report.muted.push(slot),
                Err(e) => {
                    let e = WallError::from_step(slot, e);
                    error!(slot, kind = e.kind(), error = %e, "Mute failed");
                    report.slots[slot].error = Some(e);
                }
            }
        }

        if report.is_success() {
            info!(preset = preset.name(), "Preset applied");
        }
        Ok(report)
    }

    /// Close every window. Returns how many were bound.
    pub async fn teardown(&mut self) -> usize {
        let slots = std::mem::take(&mut self.slots);
        let count = slots.len();

        for (slot, mut entry) in slots.into_iter().enumerate() {
            if let Err(e) = entry.session.shutdown().await {
                debug!(slot, error = %e, "Window did not close cleanly");
            }
        }

        if count > 0 {
            info!(count, "Pool torn down");
        }
        count
    }

    /// Read every session's address; the first failure names the dead slot.
    async fn probe(&self) -> Result<(), WallError> {
        for (slot, entry) in self.slots.iter().enumerate() {
            if let Err(e) = entry.session.current_url().await {
                warn!(slot, error = %e, "Liveness probe failed");
                return Err(WallError::SessionInvalid { slot });
            }
        }
        Ok(())
    }

    /// Launch four windows for `preset`. All or nothing.
    async fn launch_all(&mut self, preset: &Preset) -> Result<(), WallError> {
        let rects = self.planner.plan_all(self.screen);

        for (slot, item) in preset.items().iter().enumerate() {
            if slot > 0 {
                settle(self.driver.timing().launch_stagger()).await;
            }

            let start_url = self.driver.launch_url(item).to_string();
            let spec = LaunchSpec {
                slot,
                bounds: rects[slot],
                start_url: start_url.clone(),
                muted: !AudioPolicy::is_audible(slot),
            };
            debug!(slot, bounds = ?spec.bounds, url = %start_url, "Launching window");

            match self.launcher.launch(spec).await {
                Ok(session) => self.slots.push(SlotSession {
                    session,
                    launch_url: Some(start_url),
                }),
                Err(e) => {
                    let created = self.slots.len();
                    error!(slot, error = %e, "Launch failed, discarding partial pool");
                    self.teardown().await;
                    return Err(WallError::PoolIncomplete {
                        created,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(screen = ?self.screen, "Launched {} windows", WALL_SLOTS);
        Ok(())
    }
}
