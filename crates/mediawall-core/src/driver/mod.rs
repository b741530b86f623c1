//! Content driver: gets one window showing one content item.
//!
//! - [`ContentKind::DirectUrl`] loads the URL, falling back to a scripted
//!   redirect when the browser refuses the navigation.
//! - [`ContentKind::SearchableMedia`] runs the search-and-select protocol
//!   against the streaming app: boot the app, type the query into the quick
//!   search, wait for the first result and press its play control (or open
//!   the result when it has none).
//!
//! Each call is a single attempt; retries belong to the caller.

mod direct;
mod dom;
mod search;

use std::time::Duration;

use mediawall_config::{SearchAppConfig, TimingConfig};
use tracing::debug;

use crate::catalog::{ContentItem, ContentKind};
use crate::error::{StepError, WallError};
use crate::session::WallSession;

pub use dom::ElementState;
pub(crate) use dom::{script, BLANK_URL};

/// Applies content items to sessions.
#[derive(Debug, Clone)]
pub struct ContentDriver {
    timing: TimingConfig,
    app: SearchAppConfig,
}

impl ContentDriver {
    pub fn new(timing: TimingConfig, app: SearchAppConfig) -> Self {
        Self { timing, app }
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    pub fn search_app(&self) -> &SearchAppConfig {
        &self.app
    }

    /// Page a freshly launched window should open on for `item`.
    pub fn launch_url<'a>(&'a self, item: &'a ContentItem) -> &'a str {
        match item.kind {
            ContentKind::DirectUrl => &item.query,
            ContentKind::SearchableMedia => &self.app.home_url,
        }
    }

    /// Make `session` show `item`.
    ///
    /// `launched_at` is the start URL of a window that has not been driven
    /// since it was created; a direct item already at that URL is left alone.
    pub async fn apply(
        &self,
        session: &dyn WallSession,
        item: &ContentItem,
        launched_at: Option<&str>,
    ) -> Result<(), WallError> {
        debug!(slot = session.slot(), kind = ?item.kind, query = %item.query, "Applying content");

        match item.kind {
            ContentKind::DirectUrl => self.load_direct(session, &item.query, launched_at).await,
            ContentKind::SearchableMedia => self.search_and_select(session, &item.query).await,
        }
    }

    /// Park the window on a blank page so the next load starts clean.
    async fn reset_to_blank(&self, session: &dyn WallSession) -> Result<(), StepError> {
        session.navigate(BLANK_URL).await?;
        settle(self.timing.blank_settle()).await;
        Ok(())
    }
}

/// Fixed delay for states the page gives no signal for.
pub(crate) async fn settle(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
