//! Application health reporting

use marathon_models::AppStatus;
use serde::Serialize;
use tracing::{error, info, warn};

/// Overall health of an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum Health {
    /// No task is running
    Down,

    /// Some, but not all, requested instances are running
    PartiallyUp { running: i64, instances: i64 },

    /// Every requested instance is running
    Up,
}

impl Health {
    pub fn classify(app: &AppStatus) -> Self {
        if app.tasks_running == 0 {
            Health::Down
        } else if app.tasks_running < app.instances {
            Health::PartiallyUp {
                running: app.tasks_running,
                instances: app.instances,
            }
        } else {
            Health::Up
        }
    }
}

/// `numerator / denominator` as a whole percentage, rounding half up.
///
/// Returns 0 instead of NaN or infinity when the denominator is zero.
pub fn percent(numerator: i64, denominator: i64) -> i64 {
    if denominator == 0 {
        return 0;
    }
    let value = (numerator as f64 / denominator as f64 * 100.0 + 0.5).floor();
    if value.is_finite() {
        value as i64
    } else {
        0
    }
}

/// Derived status of one application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub target: String,
    pub app: AppStatus,
    pub running_percent: i64,
    pub healthy_percent: i64,
    pub staged_percent: i64,
    pub health: Health,
}

impl StatusReport {
    pub fn new(target: impl Into<String>, app: AppStatus) -> Self {
        Self {
            target: target.into(),
            running_percent: percent(app.tasks_running, app.instances),
            healthy_percent: percent(app.tasks_healthy, app.tasks_running),
            staged_percent: percent(app.tasks_staged, app.instances),
            health: Health::classify(&app),
            app,
        }
    }

    pub fn has_unhealthy(&self) -> bool {
        self.app.tasks_unhealthy > 0
    }

    pub fn has_staged(&self) -> bool {
        self.app.tasks_staged > 0
    }

    /// Report lines in display order. Warnings never abort the invocation.
    pub fn lines(&self) -> Vec<ReportLine> {
        let app = &self.app;
        let mut lines = vec![
            ReportLine::info(format!("Application status ({})", self.target)),
            ReportLine::info(format!(
                "Running: {} / {} ({}%)",
                app.tasks_running, app.instances, self.running_percent
            )),
            ReportLine::info(format!(
                "Healthy: {} / {} ({}%)",
                app.tasks_healthy, app.tasks_running, self.healthy_percent
            )),
        ];

        if self.has_unhealthy() {
            lines.push(ReportLine::warn(format!("Unhealthy: {}", app.tasks_unhealthy)));
        }

        if self.has_staged() {
            lines.push(ReportLine::info(format!(
                "Staged: {} ({}%)",
                app.tasks_staged, self.staged_percent
            )));
        }

        lines.push(match self.health {
            Health::Down => ReportLine {
                severity: Severity::Error,
                text: "Application is DOWN!".to_string(),
            },
            Health::PartiallyUp { running, instances } => ReportLine::warn(format!(
                "Application is up, but only {} of {} instances are running",
                running, instances
            )),
            Health::Up => ReportLine::info("Application is up and running"),
        });

        lines
    }

    /// Emit the report lines as tracing events
    pub fn log(&self) {
        for line in self.lines() {
            match line.severity {
                Severity::Info => info!("{}", line.text),
                Severity::Warn => warn!("{}", line.text),
                Severity::Error => error!("{}", line.text),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

/// One line of a status report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub severity: Severity,
    pub text: String,
}

impl ReportLine {
    fn info(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            text: text.into(),
        }
    }

    fn warn(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warn,
            text: text.into(),
        }
    }
}
