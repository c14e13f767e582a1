//! Classification of orchestrator responses

use marathon_models::{AppEnvelope, DeployReply, ErrorReply, VersionList};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::deploy::status::StatusReport;
use crate::errors::ControllerError;
use crate::http::client::HttpReply;

/// Result of a deploy request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeployOutcome {
    pub succeeded: bool,

    /// Present only when Marathon started a deployment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Result of a scale request, reported verbatim
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleOutcome {
    pub instances: i64,
    pub succeeded: bool,
    pub status: u16,
    pub body: Value,
}

/// Result of a rollback.
///
/// The rollback completes whatever the write returned; a transport failure
/// on the write leaves `status` empty and sets `error`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollbackOutcome {
    pub version: String,
    pub status: Option<u16>,
    pub body: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Final result of one invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum Outcome {
    Deployed(DeployOutcome),
    Status(StatusReport),
    Scaled(ScaleOutcome),
    RolledBack(RollbackOutcome),
}

/// Deploy succeeds on 200 or 201. Anything else is fatal.
pub fn interpret_deploy(
    reply: Result<HttpReply, ControllerError>,
) -> Result<DeployOutcome, ControllerError> {
    let reply = match reply {
        Ok(reply) => reply,
        Err(e) => {
            error!("Deploy request failed: {}", e);
            return Err(ControllerError::DeployFailed {
                status: None,
                message: Some(e.to_string()),
            });
        }
    };

    if reply.status != 200 && reply.status != 201 {
        let message = serde_json::from_value::<ErrorReply>(reply.body)
            .ok()
            .and_then(|e| e.message);
        error!("Deploy failed with status code: {}", reply.status);
        if let Some(message) = &message {
            error!("{}", message);
        }
        return Err(ControllerError::DeployFailed {
            status: Some(reply.status),
            message,
        });
    }

    debug!("{}", reply.body);
    let parsed = serde_json::from_value::<DeployReply>(reply.body).unwrap_or_default();

    Ok(match (parsed.deployment_id, parsed.version) {
        (Some(deployment_id), Some(version)) => DeployOutcome {
            succeeded: true,
            deployment_id: Some(deployment_id),
            version: Some(version),
            message: None,
        },
        _ => DeployOutcome {
            succeeded: true,
            ..Default::default()
        },
    })
}

/// Status requires a 200 carrying an `app` object
pub fn interpret_status(
    target: &str,
    reply: Result<HttpReply, ControllerError>,
) -> Result<StatusReport, ControllerError> {
    let reply = match reply {
        Ok(reply) => reply,
        Err(e) => {
            error!("Status request failed: {}", e);
            return Err(ControllerError::StatusFetchFailed { status: None });
        }
    };

    if reply.status != 200 {
        return Err(ControllerError::StatusFetchFailed {
            status: Some(reply.status),
        });
    }

    debug!("{}", reply.body);
    let has_app = reply.body.get("app").is_some_and(Value::is_object);
    if !has_app {
        return Err(ControllerError::StatusFetchFailed {
            status: Some(reply.status),
        });
    }

    let envelope: AppEnvelope = serde_json::from_value(reply.body)?;
    Ok(StatusReport::new(target, envelope.app))
}

/// Pick the version to roll back to from a version-list response
pub fn interpret_versions(
    reply: Result<HttpReply, ControllerError>,
) -> Result<String, ControllerError> {
    let reply = match reply {
        Ok(reply) => reply,
        Err(e) => {
            error!("Version request failed: {}", e);
            return Err(ControllerError::VersionsFetchFailed { status: None });
        }
    };

    if reply.status != 200 {
        return Err(ControllerError::VersionsFetchFailed {
            status: Some(reply.status),
        });
    }

    let versions: VersionList = serde_json::from_value(reply.body)?;
    rollback_target(&versions)
}

/// The version immediately preceding the current one (index 1)
pub fn rollback_target(versions: &VersionList) -> Result<String, ControllerError> {
    match versions.versions.get(1) {
        Some(version) => Ok(version.clone()),
        None => Err(ControllerError::NoPreviousVersion {
            versions: versions.versions.len(),
        }),
    }
}

/// Scale only fails on transport errors; the orchestrator's verdict is reported as-is
pub fn interpret_scale(
    instances: i64,
    reply: Result<HttpReply, ControllerError>,
) -> Result<ScaleOutcome, ControllerError> {
    let reply = reply.map_err(|e| ControllerError::ScaleFailed(e.to_string()))?;
    Ok(ScaleOutcome {
        instances,
        succeeded: reply.is_success(),
        status: reply.status,
        body: reply.body,
    })
}

pub fn interpret_rollback(
    version: String,
    reply: Result<HttpReply, ControllerError>,
) -> RollbackOutcome {
    match reply {
        Ok(reply) => RollbackOutcome {
            version,
            status: Some(reply.status),
            body: reply.body,
            error: None,
        },
        Err(e) => RollbackOutcome {
            version,
            status: None,
            body: Value::Null,
            error: Some(e.to_string()),
        },
    }
}
