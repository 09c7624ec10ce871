//! Error types for plan validation, configuration and terminal start-up.
//!
//! The session core itself never fails; these only surface before the
//! first frame is drawn.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the application error
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons an exercise plan is rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("exercise plan has no sets")]
    Empty,

    #[error("set at position {position} has id {found}, expected {expected}")]
    NonContiguousId {
        position: usize,
        expected: u32,
        found: u32,
    },

    #[error("set {set_id} has zero reps")]
    ZeroReps { set_id: u32 },

    #[error("set {set_id} has a zero-second {field}")]
    ZeroDuration { set_id: u32, field: &'static str },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write configuration at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("set rest must be at least one second")]
    ZeroSetRest,
}

/// Application-level errors reported by the binary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("terminal error: {message}")]
    Terminal { message: String },

    #[error("failed to initialize logging: {message}")]
    Logging { message: String },
}

impl Error {
    pub fn terminal(err: impl std::fmt::Display) -> Self {
        Self::Terminal {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_error_messages() {
        let err = PlanError::NonContiguousId {
            position: 1,
            expected: 2,
            found: 5,
        };
        assert_eq!(err.to_string(), "set at position 1 has id 5, expected 2");
        assert_eq!(
            PlanError::ZeroDuration {
                set_id: 3,
                field: "rest"
            }
            .to_string(),
            "set 3 has a zero-second rest"
        );
    }

    #[test]
    fn config_error_wraps_into_app_error() {
        let err: Error = ConfigError::ZeroSetRest.into();
        assert_eq!(
            err.to_string(),
            "configuration error: set rest must be at least one second"
        );
    }

    #[test]
    fn terminal_error_keeps_message() {
        let err = Error::terminal(std::io::Error::other("no tty"));
        assert_eq!(err.to_string(), "terminal error: no tty");
    }
}
