//! Error types for check execution

use std::fmt;
use std::path::PathBuf;

/// Result type alias for check operations
pub type CheckResult<T> = Result<T, CheckError>;

/// Errors that can occur while running a check
///
/// Every variant is fatal: the check short-circuits to a CRITICAL outcome
/// carrying the error's `Display` text. Threshold breaches are not errors.
#[derive(Debug)]
pub enum CheckError {
    /// Configured port is outside the usable range
    InvalidPort(u16),

    /// Configured pgpass file does not exist
    PassFileMissing(PathBuf),

    /// pgpass file exists but could not be read
    PassFileUnreadable { path: PathBuf, message: String },

    /// Connecting to the server failed
    ConnectionFailed(String),

    /// The liveness round-trip failed
    PingFailed(String),

    /// One of the introspection queries failed
    QueryFailed {
        query: &'static str,
        message: String,
    },
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckError::InvalidPort(port) => {
                write!(f, "invalid port {port}, should be a value between 1 and 65535")
            }
            CheckError::PassFileMissing(path) => {
                write!(f, "unable to open the supplied pgpass file {}", path.display())
            }
            CheckError::PassFileUnreadable { path, message } => {
                write!(f, "error reading pgpass file {}: {message}", path.display())
            }
            CheckError::ConnectionFailed(msg) => write!(f, "error connecting to postgres: {msg}"),
            CheckError::PingFailed(msg) => write!(f, "error pinging postgres: {msg}"),
            CheckError::QueryFailed { query, message } => {
                write!(f, "error querying postgres {query}: {message}")
            }
        }
    }
}

impl std::error::Error for CheckError {}
