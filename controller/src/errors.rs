//! Error types for the Marathon controller

use thiserror::Error;

use crate::deploy::action::ActionKind;

/// Main error type for the controller.
///
/// Every variant is fatal for the invocation: no further request is issued
/// once one of these is returned.
#[derive(Error, Debug)]
pub enum ControllerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Template error: {0}")]
    TemplateError(String),

    #[error("You need to specify number of instances to scale to (got {0:?})")]
    InvalidScale(String),

    #[error("No previous version to roll back to ({versions} known)")]
    NoPreviousVersion { versions: usize },

    #[error("Error fetching previous versions{}", fmt_status(.status))]
    VersionsFetchFailed { status: Option<u16> },

    #[error("Could not fetch data from Marathon{}", fmt_status(.status))]
    StatusFetchFailed { status: Option<u16> },

    #[error("Could not scale: {0}")]
    ScaleFailed(String),

    #[error("Deployment failed{}{}", fmt_status(.status), fmt_message(.message))]
    DeployFailed {
        status: Option<u16>,
        message: Option<String>,
    },
}

impl ControllerError {
    /// The action that was being attempted, when the error belongs to one
    pub fn action(&self) -> Option<ActionKind> {
        match self {
            ControllerError::InvalidScale(_) | ControllerError::ScaleFailed(_) => {
                Some(ActionKind::Scale)
            }
            ControllerError::NoPreviousVersion { .. }
            | ControllerError::VersionsFetchFailed { .. } => Some(ActionKind::Rollback),
            ControllerError::StatusFetchFailed { .. } => Some(ActionKind::Status),
            ControllerError::DeployFailed { .. } => Some(ActionKind::Deploy),
            _ => None,
        }
    }

    /// HTTP status code reported by the orchestrator, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ControllerError::VersionsFetchFailed { status }
            | ControllerError::StatusFetchFailed { status }
            | ControllerError::DeployFailed { status, .. } => *status,
            ControllerError::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Orchestrator-provided message, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            ControllerError::DeployFailed { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

fn fmt_status(status: &Option<u16>) -> String {
    status
        .map(|s| format!(" (status {})", s))
        .unwrap_or_default()
}

fn fmt_message(message: &Option<String>) -> String {
    message
        .as_ref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}
