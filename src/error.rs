//! Error types for harness operations.
//!
//! This module defines [`HarnessError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Configuration problems are reported before any platform call is made
//! - Platform calls surface as [`HarnessError::Api`] or [`HarnessError::Http`]
//! - Polling loops that run out of attempts return [`HarnessError::OrchestrationTimeout`]
//! - Use `anyhow::Error` (via `HarnessError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for harness operations.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Settings or template file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a settings or template file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Requested scenario is not registered.
    #[error("Unknown scenario: {name}")]
    UnknownScenario { name: String },

    /// The service template has no entry for the configured service.
    #[error("Service '{name}' not found in service template")]
    UnknownService { name: String },

    /// A platform component rejected a request.
    #[error("{component} request to {url} failed with status {status}: {message}")]
    Api {
        component: String,
        status: u16,
        url: String,
        message: String,
    },

    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// An entity expected to exist on the platform is missing.
    #[error("{kind} '{name}' not found")]
    NotFound { kind: String, name: String },

    /// A polled operation did not reach a terminal state in time.
    #[error("Timed out waiting for {what} after {attempts} attempts")]
    OrchestrationTimeout { what: String, attempts: u32 },

    /// An orchestration request reached a failed terminal state.
    #[error("Orchestration request {request_id} failed: {message}")]
    OrchestrationFailed { request_id: String, message: String },

    /// One or more substeps failed under the collect-failures policy.
    #[error("Step '{step}' had {} failed substep(s): {}", .failures.len(), .failures.join("; "))]
    SubstepsFailed { step: String, failures: Vec<String> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Coarse classification of a [`HarnessError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed setting/template, detected before any call.
    Configuration,
    /// The platform rejected a request or could not be reached.
    ExternalCall,
    /// An asynchronous job did not finish (or finished failed).
    OrchestrationTimeout,
    /// Anything else.
    General,
}

impl HarnessError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            HarnessError::ConfigNotFound { .. }
            | HarnessError::ConfigParseError { .. }
            | HarnessError::ConfigValidationError { .. }
            | HarnessError::UnknownScenario { .. }
            | HarnessError::UnknownService { .. } => ErrorKind::Configuration,
            HarnessError::Api { .. } | HarnessError::Http(_) | HarnessError::NotFound { .. } => {
                ErrorKind::ExternalCall
            }
            HarnessError::OrchestrationTimeout { .. }
            | HarnessError::OrchestrationFailed { .. } => ErrorKind::OrchestrationTimeout,
            HarnessError::SubstepsFailed { .. }
            | HarnessError::Io(_)
            | HarnessError::Json(_)
            | HarnessError::Other(_) => ErrorKind::General,
        }
    }
}

/// Result type alias for harness operations.
pub type Result<T> = std::result::Result<T, HarnessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = HarnessError::ConfigNotFound {
            path: PathBuf::from("/etc/onaptests/settings.yaml"),
        };
        assert!(err.to_string().contains("/etc/onaptests/settings.yaml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = HarnessError::ConfigParseError {
            path: PathBuf::from("/settings.yaml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/settings.yaml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn api_error_displays_component_and_status() {
        let err = HarnessError::Api {
            component: "SO".into(),
            status: 409,
            url: "http://so/serviceInstances".into(),
            message: "duplicate".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("SO"));
        assert!(msg.contains("409"));
        assert!(msg.contains("duplicate"));
    }

    #[test]
    fn timeout_displays_attempts() {
        let err = HarnessError::OrchestrationTimeout {
            what: "request abc".into(),
            attempts: 12,
        };
        assert!(err.to_string().contains("request abc"));
        assert!(err.to_string().contains("12"));
    }

    #[test]
    fn substeps_failed_lists_failures() {
        let err = HarnessError::SubstepsFailed {
            step: "Checks".into(),
            failures: vec!["a broke".into(), "b broke".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("2 failed substep(s)"));
        assert!(msg.contains("a broke; b broke"));
    }

    #[test]
    fn kinds_are_classified() {
        assert_eq!(
            HarnessError::ConfigValidationError {
                message: "x".into()
            }
            .kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            HarnessError::NotFound {
                kind: "vnf".into(),
                name: "x".into()
            }
            .kind(),
            ErrorKind::ExternalCall
        );
        assert_eq!(
            HarnessError::OrchestrationFailed {
                request_id: "r".into(),
                message: "m".into()
            }
            .kind(),
            ErrorKind::OrchestrationTimeout
        );
        assert_eq!(
            HarnessError::Other(anyhow::anyhow!("boom")).kind(),
            ErrorKind::General
        );
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: HarnessError = io_err.into();
        assert!(matches!(err, HarnessError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(HarnessError::ConfigValidationError {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
