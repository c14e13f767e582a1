//! marathonctl - Entry Point
//!
//! Deploys a task definition to Marathon, or reports status, scales or rolls
//! back the application it describes.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use marathonctl::app::options::{DeployOptions, OptionOverrides};
use marathonctl::app::run::run;
use marathonctl::deploy::action::ActionFlags;
use marathonctl::errors::ControllerError;
use marathonctl::filesys::file::File;
use marathonctl::logs::{init_logging, LogLevel, LogOptions};
use marathonctl::utils::version_info;

#[derive(Debug, Parser)]
#[command(name = "marathonctl", version, about = "Control Marathon applications")]
struct Cli {
    /// JSON file with controller options
    #[arg(long)]
    config: Option<PathBuf>,

    /// Task definition file (default: marathon.json)
    #[arg(long)]
    task_file: Option<PathBuf>,

    /// Image substituted into `<%= marathon.image %>`
    #[arg(long)]
    image: Option<String>,

    /// Read the image from this file
    #[arg(long)]
    image_from_file: Option<String>,

    /// Delete the image file after reading it (`--delete-image-file=false` keeps it)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    delete_image_file: Option<bool>,

    /// Marathon API version (default: 2)
    #[arg(long)]
    api_version: Option<u32>,

    /// User recorded in the `deployedBy` label
    #[arg(long)]
    user: Option<String>,

    /// Extra template variable, `key=value`
    #[arg(long = "var", value_parser = parse_var)]
    vars: Vec<(String, String)>,

    #[arg(long)]
    log_level: Option<LogLevel>,

    /// Log as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Print the outcome as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Roll back to the previous version
    #[arg(long)]
    rollback: bool,

    /// Show application status
    #[arg(long)]
    status: bool,

    /// Scale to this many instances
    #[arg(long, allow_hyphen_values = true)]
    scale: Option<String>,

    /// Name shown in the status header (default: the app id)
    #[arg(long)]
    target: Option<String>,

    /// Print build information and exit
    #[arg(long)]
    version_info: bool,
}

fn parse_var(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected key=value, got {:?}", raw))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version_info {
        match serde_json::to_string_pretty(&version_info()) {
            Ok(info) => println!("{}", info),
            Err(e) => eprintln!("Failed to serialize version info: {e}"),
        }
        return ExitCode::SUCCESS;
    }

    let loaded = match &cli.config {
        Some(path) => DeployOptions::load(&File::new(path)).await,
        None => Ok(DeployOptions::default()),
    };

    let overrides = OptionOverrides {
        api_version: cli.api_version,
        user: cli.user.clone(),
        task_file: cli.task_file.clone(),
        image: cli.image.clone(),
        image_from_file: cli.image_from_file.clone(),
        delete_image_file: cli.delete_image_file,
        vars: cli.vars.clone(),
        log_level: cli.log_level.clone(),
    };

    let log_level = overrides
        .log_level
        .clone()
        .or_else(|| loaded.as_ref().ok().map(|o| o.log_level.clone()))
        .unwrap_or_default();
    if let Err(e) = init_logging(LogOptions {
        log_level,
        json_format: cli.json_logs,
    }) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let options = match loaded {
        Ok(options) => overrides.apply(options),
        Err(e) => {
            error!("Unable to read config file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let flags = ActionFlags {
        rollback: cli.rollback,
        status: cli.status,
        scale: cli.scale,
        target: cli.target,
    };

    match run(&options, &flags).await {
        Ok(outcome) => {
            if cli.json {
                match serde_json::to_string_pretty(&outcome) {
                    Ok(json) => println!("{}", json),
                    Err(e) => error!("Failed to serialize outcome: {}", e),
                }
            }
            info!("Done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_fatal(&e);
            ExitCode::FAILURE
        }
    }
}

fn report_fatal(e: &ControllerError) {
    match (e.action(), e.status_code()) {
        (Some(action), Some(status)) => error!(%action, status, "{}", e),
        (Some(action), None) => error!(%action, "{}", e),
        _ => error!("{}", e),
    }
}
