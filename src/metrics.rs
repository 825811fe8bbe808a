//! Metrics collection for the connections check
//!
//! Issues three read-only introspection queries on the already-open
//! connection. The queries run sequentially without a transaction or
//! snapshot; a monitoring sample does not need one.

use sqlx::PgConnection;
use tracing::{instrument, trace, warn};

use crate::ConnectionMetrics;
use crate::error::{CheckError, CheckResult};

/// Query server capacity and in-use connection counts.
///
/// Fails with a `QueryFailed` error naming the query that broke. The `SHOW`
/// responses are textual; a non-numeric response falls back to 0 (and is
/// logged), matching the check's established behavior.
#[instrument(skip_all)]
pub async fn collect(conn: &mut PgConnection) -> CheckResult<ConnectionMetrics> {
    let max_connections: String = sqlx::query_scalar("SHOW max_connections")
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| CheckError::QueryFailed {
            query: "max connections",
            message: e.to_string(),
        })?;

    let superuser_reserved: String = sqlx::query_scalar("SHOW superuser_reserved_connections")
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| CheckError::QueryFailed {
            query: "superuser reserved connections",
            message: e.to_string(),
        })?;

    let current_connections: i64 = sqlx::query_scalar("SELECT count(*) FROM pg_stat_activity")
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| CheckError::QueryFailed {
            query: "current connections",
            message: e.to_string(),
        })?;

    let metrics = ConnectionMetrics {
        max_connections: parse_setting(&max_connections, "max_connections"),
        superuser_reserved_connections: parse_setting(
            &superuser_reserved,
            "superuser_reserved_connections",
        ),
        current_connections,
    };

    trace!("collected {metrics:?}");

    Ok(metrics)
}

fn parse_setting(raw: &str, name: &str) -> i64 {
    raw.trim().parse().unwrap_or_else(|_| {
        warn!("server returned non-numeric {name} {raw:?}, falling back to 0");
        0
    })
}
