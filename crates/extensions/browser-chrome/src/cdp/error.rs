//! CDP error types.

use mediawall_core::StepError;
use thiserror::Error;

/// CDP error code Chrome reports once a target or session is gone.
const SESSION_NOT_FOUND: i64 = -32001;

/// CDP client errors.
#[derive(Debug, Error)]
pub enum CdpError {
    /// Failed to connect to Chrome.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Nothing answers on the DevTools endpoint.
    #[error("Chrome not available at {0}")]
    ChromeNotAvailable(String),

    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// CDP protocol error.
    #[error("CDP error: {message} (code: {code})")]
    Protocol { code: i64, message: String },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error (for endpoint discovery).
    #[error("HTTP error: {0}")]
    Http(String),

    /// No page target to attach to.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// Navigation failed.
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// JavaScript execution error.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    /// Timeout.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// The websocket is closed; the browser is gone.
    #[error("Session closed")]
    SessionClosed,

    /// Invalid response.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl CdpError {
    /// The browser or its page can no longer be driven.
    pub fn is_fatal(&self) -> bool {
        match self {
            CdpError::SessionClosed
            | CdpError::WebSocket(_)
            | CdpError::ConnectionFailed(_)
            | CdpError::ChromeNotAvailable(_)
            | CdpError::Http(_)
            | CdpError::PageNotFound(_) => true,
            CdpError::Protocol { code, .. } => *code == SESSION_NOT_FOUND,
            _ => false,
        }
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::WebSocket(e.to_string())
    }
}

impl From<reqwest::Error> for CdpError {
    fn from(e: reqwest::Error) -> Self {
        CdpError::Http(e.to_string())
    }
}

impl From<url::ParseError> for CdpError {
    fn from(e: url::ParseError) -> Self {
        CdpError::ConnectionFailed(format!("Invalid URL: {}", e))
    }
}

impl From<CdpError> for StepError {
    fn from(e: CdpError) -> Self {
        if e.is_fatal() {
            return StepError::DriverDead(e.to_string());
        }
        match e {
            CdpError::Timeout(msg) => StepError::Timeout(msg),
            CdpError::NavigationFailed(msg) => StepError::Navigation(msg),
            other => StepError::Script(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_session_is_driver_dead() {
        let step: StepError = CdpError::SessionClosed.into();
        assert!(matches!(step, StepError::DriverDead(_)));

        let step: StepError = CdpError::WebSocket("reset by peer".to_string()).into();
        assert!(matches!(step, StepError::DriverDead(_)));
    }

    #[test]
    fn test_missing_target_is_driver_dead() {
        let err = CdpError::Protocol {
            code: -32001,
            message: "Session with given id not found.".to_string(),
        };
        assert!(err.is_fatal());
        assert!(matches!(StepError::from(err), StepError::DriverDead(_)));
    }

    #[test]
    fn test_recoverable_errors() {
        let step: StepError = CdpError::NavigationFailed("net::ERR_ABORTED".to_string()).into();
        assert_eq!(step, StepError::Navigation("net::ERR_ABORTED".to_string()));

        let step: StepError = CdpError::Timeout("Page load timeout".to_string()).into();
        assert_eq!(step, StepError::Timeout("Page load timeout".to_string()));

        let step: StepError = CdpError::JavaScript("Uncaught".to_string()).into();
        assert!(matches!(step, StepError::Script(_)));

        let other = CdpError::Protocol {
            code: -32000,
            message: "Cannot navigate to invalid URL".to_string(),
        };
        assert!(matches!(StepError::from(other), StepError::Script(_)));
    }
}
