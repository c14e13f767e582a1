//! Executes one operator action against the orchestrator

use marathon_models::{RollbackRequest, ScaleRequest};
use serde_json::Value;
use tracing::{info, warn};

use crate::deploy::action::ActionRequest;
use crate::deploy::endpoint::{resource_url, versions_url};
use crate::deploy::interpret::{
    interpret_deploy, interpret_rollback, interpret_scale, interpret_status, interpret_versions,
    DeployOutcome, Outcome, RollbackOutcome, ScaleOutcome,
};
use crate::deploy::status::StatusReport;
use crate::errors::ControllerError;
use crate::http::client::Orchestrator;
use crate::task::descriptor::TaskDescriptor;

/// Deployment decision engine
pub struct Controller<O> {
    orchestrator: O,
}

impl<O: Orchestrator> Controller<O> {
    pub fn new(orchestrator: O) -> Self {
        Self { orchestrator }
    }

    /// Run `action` for `descriptor`.
    ///
    /// Returns exactly once per invocation. An `Err` is fatal: no request is
    /// issued after the one that produced it.
    pub async fn run(
        &self,
        descriptor: &TaskDescriptor,
        action: &ActionRequest,
    ) -> Result<Outcome, ControllerError> {
        let url = resource_url(descriptor)?;

        match action {
            ActionRequest::Deploy => self.deploy(&url, descriptor.body()).await.map(Outcome::Deployed),
            ActionRequest::Status { target } => self.status(&url, target).await.map(Outcome::Status),
            ActionRequest::Scale { count } => self.scale(&url, *count).await.map(Outcome::Scaled),
            ActionRequest::Rollback => self.rollback(&url).await.map(Outcome::RolledBack),
        }
    }

    async fn deploy(&self, url: &str, body: &Value) -> Result<DeployOutcome, ControllerError> {
        info!("Deploying to {}", url);

        let outcome = interpret_deploy(self.orchestrator.put(url, body).await)?;
        if let (Some(id), Some(version)) = (&outcome.deployment_id, &outcome.version) {
            info!("Success");
            info!("ID: {}", id);
            info!("Version: {}", version);
        }
        Ok(outcome)
    }

    async fn status(&self, url: &str, target: &str) -> Result<StatusReport, ControllerError> {
        let report = interpret_status(target, self.orchestrator.get(url).await)?;
        report.log();
        Ok(report)
    }

    async fn scale(&self, url: &str, instances: i64) -> Result<ScaleOutcome, ControllerError> {
        info!("Scale: {}", instances);

        let body = serde_json::to_value(ScaleRequest { instances })?;
        let outcome = interpret_scale(instances, self.orchestrator.put(url, &body).await)?;

        if outcome.succeeded {
            info!("Response code: {}", outcome.status);
        } else {
            warn!("Response code: {}", outcome.status);
        }
        info!("{}", outcome.body);
        Ok(outcome)
    }

    async fn rollback(&self, url: &str) -> Result<RollbackOutcome, ControllerError> {
        let version = interpret_versions(self.orchestrator.get(&versions_url(url)).await)?;
        info!("Rolling back to {}", version);

        let body = serde_json::to_value(RollbackRequest {
            version: version.clone(),
        })?;
        let outcome = interpret_rollback(version, self.orchestrator.put(url, &body).await);

        match &outcome.error {
            None => info!("{}", outcome.body),
            Some(e) => warn!("Rollback request failed: {}", e),
        }
        Ok(outcome)
    }
}
