//! Search-and-select protocol against the streaming app.

use tracing::{debug, info};

use crate::error::{StepError, WallError};
use crate::session::WallSession;

use super::dom::{clear_value, probe, wait_for, Condition, ElementState};
use super::{settle, ContentDriver};

impl ContentDriver {
    pub(crate) async fn search_and_select(
        &self,
        session: &dyn WallSession,
        query: &str,
    ) -> Result<(), WallError> {
        let slot = session.slot();
        let step = |e: StepError| WallError::from_step(slot, e);

        // Boot the app from a clean document.
        self.reset_to_blank(session).await.map_err(step)?;
        session.navigate(&self.app.entry_url).await.map_err(step)?;
        settle(self.timing.app_boot()).await;

        // Type the query.
        let input = self.wait_for_search_input(session).await?;
        session.click_at(input.x, input.y).await.map_err(step)?;
        self.clear_search_input(session).await.map_err(step)?;
        session.insert_text(query).await.map_err(step)?;
        debug!(slot, query, "Query typed");

        // Wait for the first result row.
        settle(self.timing.results_settle()).await;
        let result_selector = &self.app.result_selector;
        let result = match wait_for(
            session,
            result_selector,
            None,
            Condition::Clickable,
            self.timing.result_timeout(),
            self.timing.poll_interval(),
        )
        .await
        {
            Ok(state) => state,
            Err(StepError::Timeout(_)) => {
                return Err(WallError::SearchResultNotFound {
                    slot,
                    query: query.to_string(),
                });
            }
            Err(e) => return Err(step(e)),
        };

        // Prefer the play control inside that row; never search the whole page.
        let play = probe(session, &self.app.play_selector, Some(result_selector))
            .await
            .map_err(step)?;
        if play.is_interactable() {
            session.click_at(play.x, play.y).await.map_err(step)?;
            info!(slot, query, "Started playback from first result");
        } else {
            session.click_at(result.x, result.y).await.map_err(step)?;
            info!(slot, query, "Opened first result");
        }

        Ok(())
    }

    /// Wait for the quick-search input to exist, then to accept input.
    async fn wait_for_search_input(
        &self,
        session: &dyn WallSession,
    ) -> Result<ElementState, WallError> {
        let slot = session.slot();
        let selector = &self.app.search_input_selector;
        let timeout = self.timing.element_timeout();
        let poll = self.timing.poll_interval();
        let timed_out = |e: StepError| match e {
            StepError::Timeout(_) => WallError::ElementTimeout {
                slot,
                selector: selector.clone(),
            },
            e => WallError::from_step(slot, e),
        };

        // Presence does not imply the app has enabled the field yet.
        wait_for(session, selector, None, Condition::Present, timeout, poll)
            .await
            .map_err(timed_out)?;
        wait_for(session, selector, None, Condition::Interactable, timeout, poll)
            .await
            .map_err(timed_out)
    }

    /// Empty the search input, falling back to select-all + delete when the
    /// app rejects a programmatic clear. An input that vanished is an error;
    /// typing would go nowhere.
    async fn clear_search_input(&self, session: &dyn WallSession) -> Result<(), StepError> {
        match clear_value(session, &self.app.search_input_selector).await {
            Ok(true) => return Ok(()),
            Ok(false) => debug!(slot = session.slot(), "Input kept its text, using keyboard clear"),
            Err(e @ (StepError::DriverDead(_) | StepError::ElementNotFound(_))) => return Err(e),
            Err(e) => debug!(slot = session.slot(), error = %e, "Clear failed, using keyboard clear"),
        }

        session.press_key_combo("Control+a").await?;
        session.press_key("Backspace").await?;
        Ok(())
    }
}
