//! Engine error types.

use thiserror::Error;

/// Outcome of a single automation step that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    /// A bounded wait expired.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// The element the step needed is not in the page.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// The browser session no longer answers.
    #[error("Driver dead: {0}")]
    DriverDead(String),

    /// The browser refused or failed a navigation.
    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// A page script threw or returned something unusable.
    #[error("Script error: {0}")]
    Script(String),
}

/// Errors surfaced by the orchestration engine.
#[derive(Debug, Error)]
pub enum WallError {
    #[error("Preset not found: {0}")]
    PresetNotFound(String),

    #[error("Invalid preset '{name}': {reason}")]
    InvalidPreset { name: String, reason: String },

    #[error("Session in slot {slot} is no longer valid")]
    SessionInvalid { slot: usize },

    #[error("No clickable search result for '{query}' in slot {slot}")]
    SearchResultNotFound { slot: usize, query: String },

    #[error("Timed out waiting for '{selector}' in slot {slot}")]
    ElementTimeout { slot: usize, selector: String },

    #[error("Navigation to {url} failed in slot {slot}: {reason}")]
    NavigationFailed {
        slot: usize,
        url: String,
        reason: String,
    },

    #[error("Slot {slot}: {source}")]
    Step {
        slot: usize,
        #[source]
        source: StepError,
    },

    #[error("Failed to launch window for slot {slot}: {reason}")]
    LaunchFailed { slot: usize, reason: String },

    #[error("Only {created} of 4 windows could be created: {reason}")]
    PoolIncomplete { created: usize, reason: String },

    #[error("Window pool is empty")]
    PoolEmpty,

    #[error("Wall worker has stopped")]
    WorkerStopped,
}

impl WallError {
    /// Convert a failed step in `slot` into an engine error.
    ///
    /// A dead driver always becomes [`WallError::SessionInvalid`] so the
    /// caller rebuilds the pool instead of retrying the slot.
    pub fn from_step(slot: usize, source: StepError) -> Self {
        match source {
            StepError::DriverDead(_) => WallError::SessionInvalid { slot },
            source => WallError::Step { slot, source },
        }
    }

    /// Slot the error is attributed to, if any.
    pub fn slot(&self) -> Option<usize> {
        match self {
            WallError::SessionInvalid { slot }
            | WallError::SearchResultNotFound { slot, .. }
            | WallError::ElementTimeout { slot, .. }
            | WallError::NavigationFailed { slot, .. }
            | WallError::Step { slot, .. }
            | WallError::LaunchFailed { slot, .. } => Some(*slot),
            _ => None,
        }
    }

    /// Stable name of the error kind, used in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            WallError::PresetNotFound(_) => "PresetNotFound",
            WallError::InvalidPreset { .. } => "InvalidPreset",
            WallError::SessionInvalid { .. } => "SessionInvalid",
            WallError::SearchResultNotFound { .. } => "SearchResultNotFound",
            WallError::ElementTimeout { .. } => "ElementTimeout",
            WallError::NavigationFailed { .. } => "NavigationFailed",
            WallError::Step { .. } => "StepFailed",
            WallError::LaunchFailed { .. } => "LaunchFailed",
            WallError::PoolIncomplete { .. } => "PoolIncomplete",
            WallError::PoolEmpty => "PoolEmpty",
            WallError::WorkerStopped => "WorkerStopped",
        }
    }

    /// Whether the failure means the pool must be rebuilt.
    pub fn is_session_lost(&self) -> bool {
        matches!(self, WallError::SessionInvalid { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_dead_becomes_session_invalid() {
        let err = WallError::from_step(2, StepError::DriverDead("socket closed".to_string()));
        assert!(matches!(err, WallError::SessionInvalid { slot: 2 }));
        assert!(err.is_session_lost());
    }

    #[test]
    fn test_other_steps_keep_source() {
        let err = WallError::from_step(1, StepError::Script("boom".to_string()));
        assert!(matches!(err, WallError::Step { slot: 1, .. }));
        assert!(!err.is_session_lost());
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_slot_attribution() {
        let err = WallError::SearchResultNotFound {
            slot: 3,
            query: "Elf".to_string(),
        };
        assert_eq!(err.slot(), Some(3));
        assert_eq!(err.kind(), "SearchResultNotFound");
        assert_eq!(WallError::PoolEmpty.slot(), None);
    }

    #[test]
    fn test_error_display() {
        let err = WallError::PresetNotFound("easter".to_string());
        assert_eq!(err.to_string(), "Preset not found: easter");

        let err = WallError::PoolIncomplete {
            created: 2,
            reason: "port in use".to_string(),
        };
        assert_eq!(err.to_string(), "Only 2 of 4 windows could be created: port in use");
    }
}
