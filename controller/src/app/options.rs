//! Controller configuration options

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::ControllerError;
use crate::filesys::file::File;
use crate::logs::LogLevel;
use crate::utils::current_user;

/// Options recognized by the controller.
///
/// Resolved once at startup and passed down read-only. Every key is optional
/// in a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeployOptions {
    /// Marathon API version used in resource paths
    pub api_version: u32,

    /// Recorded in the `deployedBy` label
    pub user: String,

    /// Task definition file
    pub task_file: PathBuf,

    /// Image substituted into `<%= marathon.image %>`
    pub image: String,

    /// When non-empty, the image is read from this file
    pub image_from_file: String,

    /// Delete `image_from_file` once it has been read
    pub delete_image_file: bool,

    /// Extra template variables
    pub vars: BTreeMap<String, String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    pub log_level: LogLevel,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            api_version: 2,
            user: current_user(),
            task_file: PathBuf::from("marathon.json"),
            image: String::new(),
            image_from_file: String::new(),
            delete_image_file: false,
            vars: BTreeMap::new(),
            timeout_secs: 30,
            log_level: LogLevel::Info,
        }
    }
}

impl DeployOptions {
    /// Load options from a JSON config file, defaulting missing keys
    pub async fn load(file: &File) -> Result<Self, ControllerError> {
        file.read_json::<DeployOptions>().await
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ControllerError> {
        if self.api_version == 0 {
            return Err(ControllerError::ConfigError(
                "apiVersion must be at least 1".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ControllerError::ConfigError(
                "timeoutSecs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Command line overrides applied on top of the loaded options
#[derive(Debug, Clone, Default)]
pub struct OptionOverrides {
    pub api_version: Option<u32>,
    pub user: Option<String>,
    pub task_file: Option<PathBuf>,
    pub image: Option<String>,
    pub image_from_file: Option<String>,
    pub delete_image_file: Option<bool>,
    pub vars: Vec<(String, String)>,
    pub log_level: Option<LogLevel>,
}

impl OptionOverrides {
    pub fn apply(self, mut options: DeployOptions) -> DeployOptions {
        if let Some(api_version) = self.api_version {
            options.api_version = api_version;
        }
        if let Some(user) = self.user {
            options.user = user;
        }
        if let Some(task_file) = self.task_file {
            options.task_file = task_file;
        }
        if let Some(image) = self.image {
            options.image = image;
        }
        if let Some(image_from_file) = self.image_from_file {
            options.image_from_file = image_from_file;
        }
        if let Some(delete_image_file) = self.delete_image_file {
            options.delete_image_file = delete_image_file;
        }
        options.vars.extend(self.vars);
        if let Some(log_level) = self.log_level {
            options.log_level = log_level;
        }
        options
    }
}
