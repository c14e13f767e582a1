//! Single invocation wiring: options → descriptor → action → outcome

use tracing::info;

use crate::app::options::DeployOptions;
use crate::deploy::action::{select_action, ActionFlags};
use crate::deploy::engine::Controller;
use crate::deploy::interpret::Outcome;
use crate::errors::ControllerError;
use crate::http::client::{MarathonClient, Orchestrator};
use crate::task::resolver::resolve;
use crate::utils::hostname;

/// Run one controller invocation against the Marathon endpoint of the task file
pub async fn run(options: &DeployOptions, flags: &ActionFlags) -> Result<Outcome, ControllerError> {
    options.validate()?;
    let client = MarathonClient::new(options.timeout())?;
    run_with(options, flags, client, &hostname()).await
}

/// Same as [`run`] with an explicit transport and hostname
pub async fn run_with<O: Orchestrator>(
    options: &DeployOptions,
    flags: &ActionFlags,
    orchestrator: O,
    hostname: &str,
) -> Result<Outcome, ControllerError> {
    let mut descriptor = resolve(options).await?;
    descriptor.prepare_for_submission(&options.user, hostname);

    let action = select_action(flags, &descriptor.id)?;
    info!(action = %action.kind(), app = %descriptor.id, "Running action");

    Controller::new(orchestrator).run(&descriptor, &action).await
}
