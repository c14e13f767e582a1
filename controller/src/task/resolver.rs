//! Task file resolution: image sourcing, templating and parsing

use serde_json::Value;
use tracing::{debug, info};

use crate::app::options::DeployOptions;
use crate::errors::ControllerError;
use crate::filesys::file::File;
use crate::task::descriptor::TaskDescriptor;
use crate::task::template::{render, TemplateVars};

/// Resolve the image, either given directly or read from `image_from_file`
pub async fn resolve_image(options: &DeployOptions) -> Result<String, ControllerError> {
    if options.image_from_file.is_empty() {
        return Ok(options.image.clone());
    }

    let file = File::new(&options.image_from_file);
    let image = file.read_string().await?.trim_end().to_string();
    debug!("Read image {} from {}", image, file.path().display());

    if options.delete_image_file {
        file.delete().await?;
        debug!("Deleted {}", file.path().display());
    }

    Ok(image)
}

/// Variables visible to `<%= ... %>` placeholders
pub fn template_vars(options: &DeployOptions, image: &str) -> TemplateVars {
    let mut vars = TemplateVars::new();
    for (key, value) in &options.vars {
        vars.insert(key, value.clone());
    }
    vars.insert("marathon.image", image)
        .insert("marathon.user", options.user.clone())
        .insert("marathon.apiVersion", options.api_version.to_string());
    vars
}

/// Read, render and parse the task file into a descriptor
pub async fn resolve(options: &DeployOptions) -> Result<TaskDescriptor, ControllerError> {
    let image = resolve_image(options).await?;

    let task_file = File::new(&options.task_file);
    info!("Loading task definition from {}", task_file.path().display());
    let source = task_file.read_string().await?;

    let rendered = render(&source, &template_vars(options, &image))?;
    let raw: Value = serde_json::from_str(&rendered)?;

    TaskDescriptor::from_value(raw, options.api_version, image)
}
