//! Task descriptor

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::errors::ControllerError;

/// Label recording who deployed the application
pub const LABEL_DEPLOYED_BY: &str = "deployedBy";

/// Label recording the host the deployment was issued from
pub const LABEL_DEPLOYED_FROM: &str = "deployedFrom";

/// A fully resolved application definition
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDescriptor {
    /// Orchestrator base URL. Routing metadata, never sent in the body.
    pub endpoint: String,

    pub api_version: u32,

    /// Application id, e.g. `/team/web`
    pub id: String,

    pub instances: Option<i64>,

    pub labels: BTreeMap<String, String>,

    pub image: String,

    /// Application spec as it will be submitted
    pub raw_body: Value,
}

impl TaskDescriptor {
    /// Build a descriptor from a parsed task file
    pub fn from_value(
        raw_body: Value,
        api_version: u32,
        image: impl Into<String>,
    ) -> Result<Self, ControllerError> {
        let object = raw_body.as_object().ok_or_else(|| {
            ControllerError::ConfigError("task definition must be a JSON object".to_string())
        })?;

        let endpoint = required_string(object, "endpoint")?;
        let id = required_string(object, "id")?;
        let instances = object.get("instances").and_then(Value::as_i64);

        let labels = match object.get("labels") {
            None | Some(Value::Null) => BTreeMap::new(),
            Some(Value::Object(map)) => map
                .iter()
                .map(|(k, v)| (k.clone(), label_value(v)))
                .collect(),
            Some(_) => {
                return Err(ControllerError::ConfigError(
                    "task labels must be a JSON object".to_string(),
                ))
            }
        };

        Ok(Self {
            endpoint,
            api_version,
            id,
            instances,
            labels,
            image: image.into(),
            raw_body,
        })
    }

    /// Stamp the deployment labels and drop the routing-only `endpoint` field
    pub fn prepare_for_submission(&mut self, user: &str, hostname: &str) {
        self.labels
            .insert(LABEL_DEPLOYED_BY.to_string(), user.to_string());
        self.labels
            .insert(LABEL_DEPLOYED_FROM.to_string(), hostname.to_string());

        if let Value::Object(body) = &mut self.raw_body {
            body.remove("endpoint");

            let labels = body
                .entry("labels")
                .or_insert_with(|| Value::Object(Map::new()));
            if !labels.is_object() {
                *labels = Value::Object(Map::new());
            }
            if let Value::Object(labels) = labels {
                labels.insert(LABEL_DEPLOYED_BY.to_string(), Value::from(user));
                labels.insert(LABEL_DEPLOYED_FROM.to_string(), Value::from(hostname));
            }
        }
    }

    /// Body submitted on deploy
    pub fn body(&self) -> &Value {
        &self.raw_body
    }
}

fn required_string(object: &Map<String, Value>, key: &str) -> Result<String, ControllerError> {
    match object.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        _ => Err(ControllerError::ConfigError(format!(
            "task definition needs a non-empty string `{}`",
            key
        ))),
    }
}

fn label_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
