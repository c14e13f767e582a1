//! Resource URL construction

use url::Url;

use crate::errors::ControllerError;
use crate::task::descriptor::TaskDescriptor;

/// Build the application resource URL: `{endpoint}/v{apiVersion}/apps/{id}`.
///
/// The id is appended verbatim, so `/my/app` yields `.../apps//my/app`.
pub fn resource_url(descriptor: &TaskDescriptor) -> Result<String, ControllerError> {
    if descriptor.endpoint.is_empty() {
        return Err(ControllerError::ConfigError(
            "task endpoint must not be empty".to_string(),
        ));
    }
    if descriptor.id.is_empty() {
        return Err(ControllerError::ConfigError(
            "task id must not be empty".to_string(),
        ));
    }

    Url::parse(&descriptor.endpoint).map_err(|e| {
        ControllerError::ConfigError(format!(
            "invalid endpoint {:?}: {}",
            descriptor.endpoint, e
        ))
    })?;

    Ok(format!(
        "{}/v{}/apps/{}",
        descriptor.endpoint, descriptor.api_version, descriptor.id
    ))
}

/// URL of the version history of a resource
pub fn versions_url(resource: &str) -> String {
    format!("{}/versions", resource)
}
