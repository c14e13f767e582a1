//! Operator action selection

use std::fmt;

use crate::errors::ControllerError;

/// Operator flags as collected by the command line
#[derive(Debug, Clone, Default)]
pub struct ActionFlags {
    /// Roll back to the previous version
    pub rollback: bool,

    /// Print the application status
    pub status: bool,

    /// Raw `--scale` value, if the flag was given
    pub scale: Option<String>,

    /// Name shown in the status header
    pub target: Option<String>,
}

/// The single action performed by an invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRequest {
    /// Create or update the application
    Deploy,

    /// Roll back to the version preceding the current one
    Rollback,

    /// Report the application's task counters
    Status { target: String },

    /// Change the number of instances
    Scale { count: i64 },
}

/// Discriminant of [`ActionRequest`], used to tag errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Deploy,
    Rollback,
    Status,
    Scale,
}

impl ActionRequest {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionRequest::Deploy => ActionKind::Deploy,
            ActionRequest::Rollback => ActionKind::Rollback,
            ActionRequest::Status { .. } => ActionKind::Status,
            ActionRequest::Scale { .. } => ActionKind::Scale,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::Deploy => "deploy",
            ActionKind::Rollback => "rollback",
            ActionKind::Status => "status",
            ActionKind::Scale => "scale",
        };
        f.write_str(name)
    }
}

/// Pick exactly one action from the operator flags.
///
/// Priority is rollback, then status, then scale, then deploy. A scale flag
/// whose value is not an integer is rejected here so that nothing reaches
/// the orchestrator.
pub fn select_action(
    flags: &ActionFlags,
    default_target: &str,
) -> Result<ActionRequest, ControllerError> {
    if flags.rollback {
        return Ok(ActionRequest::Rollback);
    }

    if flags.status {
        let target = flags
            .target
            .clone()
            .unwrap_or_else(|| default_target.to_string());
        return Ok(ActionRequest::Status { target });
    }

    if let Some(raw) = &flags.scale {
        let count = parse_instance_count(raw)?;
        return Ok(ActionRequest::Scale { count });
    }

    Ok(ActionRequest::Deploy)
}

/// Parse a target instance count. Range checks are left to the orchestrator.
pub fn parse_instance_count(raw: &str) -> Result<i64, ControllerError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ControllerError::InvalidScale(raw.to_string()))
}
