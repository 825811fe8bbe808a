//! One-shot check execution
//!
//! The external monitoring agent calls exactly two entry points per check:
//! `validate` before any network activity, then one of the `execute_*`
//! functions. Every execution failure is folded into a CRITICAL outcome; the
//! agent only ever sees a severity and a message.

use std::future::Future;
use std::time::Duration;

use tracing::{instrument, trace};

use crate::ConnectionMetrics;
use crate::config::{ConnectionConfig, ThresholdConfig};
use crate::credentials;
use crate::error::{CheckError, CheckResult};
use crate::metrics;
use crate::probe;
use crate::thresholds::{self, Severity};

/// Result of a single check invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub severity: Severity,
    pub message: String,
}

impl Outcome {
    /// Fold a failure into the CRITICAL outcome the agent reports.
    pub fn critical(message: String) -> Self {
        Self {
            severity: Severity::Critical,
            message,
        }
    }
}

/// Validate the configuration before any network activity.
pub fn validate(config: &ConnectionConfig) -> CheckResult<()> {
    if config.port <= 1 || config.port >= 65535 {
        return Err(CheckError::InvalidPort(config.port));
    }
    if let Some(path) = &config.pgpass
        && !path.exists()
    {
        return Err(CheckError::PassFileMissing(path.clone()));
    }
    Ok(())
}

/// Run the liveness check: resolve credentials, connect, ping.
#[instrument(skip_all)]
pub async fn execute_alive(config: &ConnectionConfig) -> Outcome {
    match alive(config).await {
        Ok(()) => Outcome {
            severity: Severity::Ok,
            message: "postgres server is alive.".to_string(),
        },
        Err(e) => Outcome::critical(e.to_string()),
    }
}

/// Run the connections check: resolve credentials, connect, ping, collect
/// metrics, evaluate thresholds.
#[instrument(skip_all)]
pub async fn execute_connections(
    config: &ConnectionConfig,
    thresholds_config: &ThresholdConfig,
) -> Outcome {
    match sample(config).await {
        Ok(metrics) => {
            let (severity, message) = thresholds::evaluate(&metrics, thresholds_config);
            Outcome { severity, message }
        }
        Err(e) => Outcome::critical(e.to_string()),
    }
}

async fn alive(config: &ConnectionConfig) -> CheckResult<()> {
    let credentials = credentials::resolve(config)?;
    let mut conn = probe::connect(&credentials).await?;

    let result = probe::ping(&mut conn).await;

    // the connection is released exactly once, whatever the ping did
    probe::close(conn).await;
    result
}

async fn sample(config: &ConnectionConfig) -> CheckResult<ConnectionMetrics> {
    let credentials = credentials::resolve(config)?;
    let mut conn = probe::connect(&credentials).await?;

    let result = async {
        probe::ping(&mut conn).await?;
        metrics::collect(&mut conn).await
    }
    .await;

    // the connection is released exactly once, whichever step failed
    probe::close(conn).await;
    result
}

/// Bound a check by an overall timeout.
///
/// Dropping the inner future aborts any outstanding network operation, so an
/// unreachable server cannot hang the invocation past the deadline.
pub async fn run<F>(timeout_secs: u64, check: F) -> Outcome
where
    F: Future<Output = Outcome>,
{
    match tokio::time::timeout(Duration::from_secs(timeout_secs), check).await {
        Ok(outcome) => outcome,
        Err(_) => Outcome::critical(format!("check timed out after {timeout_secs} seconds")),
    }
}

/// Print the outcome and exit with its severity's status code.
pub fn report(outcome: &Outcome) -> ! {
    trace!("reporting {outcome:?}");
    println!("{}", outcome.message);
    std::process::exit(outcome.severity.exit_code())
}
