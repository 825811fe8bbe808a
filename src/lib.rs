pub mod check;
pub mod config;
pub mod credentials;
pub mod error;
pub mod metrics;
pub mod probe;
pub mod thresholds;

use serde::{Deserialize, Serialize};

/// Connection capacity figures as reported by the server.
///
/// `max_connections` and `superuser_reserved_connections` are server settings,
/// `current_connections` is the number of backends at the instant of the
/// sample. The three values are read sequentially without a snapshot, so they
/// may reflect slightly different instants under load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionMetrics {
    pub max_connections: i64,
    pub superuser_reserved_connections: i64,
    pub current_connections: i64,
}

impl ConnectionMetrics {
    /// Connections usable by regular clients.
    pub fn available_connections(&self) -> i64 {
        self.max_connections - self.superuser_reserved_connections
    }
}
