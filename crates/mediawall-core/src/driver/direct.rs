//! Direct URL loading.

use serde_json::json;
use tracing::{debug, warn};

use crate::error::{StepError, WallError};
use crate::session::WallSession;

use super::{settle, ContentDriver};

const REDIRECT_BODY: &str = "window.location.href = args.url; return true;";

impl ContentDriver {
    pub(crate) async fn load_direct(
        &self,
        session: &dyn WallSession,
        url: &str,
        launched_at: Option<&str>,
    ) -> Result<(), WallError> {
        let slot = session.slot();

        if launched_at == Some(url) {
            debug!(slot, url, "Window launched at target, no navigation needed");
            return Ok(());
        }

        self.reset_to_blank(session)
            .await
            .map_err(|e| WallError::from_step(slot, e))?;

        let first = match session.navigate(url).await {
            Ok(()) => {
                debug!(slot, url, "Loaded");
                return Ok(());
            }
            Err(e @ StepError::DriverDead(_)) => return Err(WallError::from_step(slot, e)),
            Err(e) => e,
        };

        warn!(slot, url, error = %first, "Navigation failed, retrying with scripted redirect");

        match self.redirect(session, url).await {
            Ok(()) => {
                debug!(slot, url, "Loaded via redirect");
                Ok(())
            }
            Err(e @ StepError::DriverDead(_)) => Err(WallError::from_step(slot, e)),
            Err(second) => Err(WallError::NavigationFailed {
                slot,
                url: url.to_string(),
                reason: format!("{}; redirect: {}", first, second),
            }),
        }
    }

    async fn redirect(&self, session: &dyn WallSession, url: &str) -> Result<(), StepError> {
        let source = super::script("mediawallRedirect", REDIRECT_BODY, json!({ "url": url }));
        session.evaluate(&source).await?;
        settle(self.timing.blank_settle()).await;
        Ok(())
    }
}
