//! Marathon API models

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Task counters of a single application, as returned by `GET /v2/apps/{id}`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStatus {
    /// Desired number of instances
    #[serde(default, deserialize_with = "lenient_count")]
    pub instances: i64,

    #[serde(default, deserialize_with = "lenient_count")]
    pub tasks_running: i64,

    #[serde(default, deserialize_with = "lenient_count")]
    pub tasks_healthy: i64,

    #[serde(default, deserialize_with = "lenient_count")]
    pub tasks_unhealthy: i64,

    #[serde(default, deserialize_with = "lenient_count")]
    pub tasks_staged: i64,
}

/// Envelope around the application object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppEnvelope {
    pub app: AppStatus,
}

/// Version history of an application, newest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionList {
    #[serde(default)]
    pub versions: Vec<String>,
}

/// Body of a successful deploy (`PUT /v2/apps/{id}`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployReply {
    #[serde(default, deserialize_with = "lenient_string")]
    pub deployment_id: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub version: Option<String>,
}

/// Error body returned by Marathon on rejected requests
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorReply {
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
}

/// Scale request body
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScaleRequest {
    pub instances: i64,
}

/// Rollback request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollbackRequest {
    pub version: String,
}

/// Interpret a JSON value as a task counter.
///
/// Integers are taken as-is, finite floats are truncated and numeric strings
/// are parsed. Anything else counts as zero.
pub fn count_from_value(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn lenient_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(count_from_value(&value))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
