//! # Session Error Types
//!
//! Errors raised at the edges of the session: loading configuration and
//! reading command logs. Cart operations themselves never fail.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │  Command Log    │  │      Domain             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  ConfigLoad...  │  │  LogParseFailed │  │  Core (CoreError)       │ │
//! │  │                 │  │  Io             │  │  (config validation)    │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use swcart_core::CoreError;
use thiserror::Error;

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Session error type.
#[derive(Debug, Error)]
pub enum SessionError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Failed to load or parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    // =========================================================================
    // Command Log Errors
    // =========================================================================
    /// A command log could not be parsed.
    #[error("Failed to parse command log: {0}")]
    LogParseFailed(String),

    /// File system error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // =========================================================================
    // Domain Errors
    // =========================================================================
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<toml::de::Error> for SessionError {
    fn from(err: toml::de::Error) -> Self {
        SessionError::ConfigLoadFailed(err.to_string())
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::LogParseFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SessionError::ConfigLoadFailed("expected a table".into());
        assert_eq!(err.to_string(), "Failed to load config: expected a table");
    }

    #[test]
    fn test_core_error_is_transparent() {
        let err: SessionError = CoreError::UnknownQuantityMode("strict".into()).into();
        assert_eq!(
            err.to_string(),
            "Unknown quantity mode: 'strict'. Valid options: permissive, normalize"
        );
    }

    #[test]
    fn test_json_error_converts_to_log_parse_failed() {
        let json_err = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let err: SessionError = json_err.into();
        assert!(matches!(err, SessionError::LogParseFailed(_)));
    }
}
