//! Severity levels and threshold evaluation
//!
//! `evaluate` is a pure function from a metrics sample and threshold
//! configuration to a severity plus the message the monitoring agent prints.

use serde::{Deserialize, Serialize};

use crate::ConnectionMetrics;
use crate::config::ThresholdConfig;

/// Check severity, totally ordered OK < WARNING < CRITICAL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Ok,
    Warning,
    Critical,
}

impl Severity {
    /// Process exit status understood by the monitoring agent.
    pub fn exit_code(&self) -> i32 {
        match self {
            Severity::Ok => 0,
            Severity::Warning => 1,
            Severity::Critical => 2,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Ok => write!(f, "OK"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Map a metrics sample to a severity verdict and message.
///
/// Boundary values escalate: a count sitting exactly on a threshold gets the
/// corresponding severity, and CRITICAL is checked before WARNING so a value
/// satisfying both resolves to CRITICAL.
pub fn evaluate(metrics: &ConnectionMetrics, thresholds: &ThresholdConfig) -> (Severity, String) {
    let current = metrics.current_connections;
    let available = metrics.available_connections();

    if thresholds.percentage {
        // a server cannot report max_connections = 0, so treat it as a broken
        // configuration rather than dividing by it
        if metrics.max_connections == 0 {
            return (
                Severity::Critical,
                "critical: postgres reports max_connections as 0, cannot compute connection percentage".to_string(),
            );
        }

        let pct = 100.0 * current as f64 / metrics.max_connections as f64;
        if pct >= thresholds.critical as f64 {
            return (
                Severity::Critical,
                format!(
                    "critical: postgres connections at {pct:.2}% out of {} connections",
                    metrics.max_connections
                ),
            );
        }
        if pct >= thresholds.warning as f64 {
            return (
                Severity::Warning,
                format!(
                    "warning: postgres connections at {pct:.2}% out of {} connections",
                    metrics.max_connections
                ),
            );
        }
        return (
            Severity::Ok,
            format!("postgres connections at {pct:.2}% out of {available} connections"),
        );
    }

    if current >= thresholds.critical {
        return (
            Severity::Critical,
            format!("critical: postgres connections at {current} out of {available} connections"),
        );
    }
    if current >= thresholds.warning {
        return (
            Severity::Warning,
            format!("warning: postgres connections at {current} out of {available} connections"),
        );
    }
    (
        Severity::Ok,
        format!("postgres connections at {current} out of {available} connections"),
    )
}
