use std::path::PathBuf;

/// Connection settings shared by every check binary.
///
/// Constructed once from the command line and never mutated afterwards; all
/// further stages borrow it.
#[derive(Debug, Clone, clap::Args)]
pub struct ConnectionConfig {
    /// postgres user to connect
    #[arg(short, long, default_value = "")]
    pub user: String,

    /// Password for user
    #[arg(short, long, default_value = "")]
    pub password: String,

    /// Location of .pgpass file for access to postgres
    #[arg(short = 'f', long)]
    pub pgpass: Option<PathBuf>,

    /// Hostname to login to
    #[arg(long, default_value = "localhost")]
    pub hostname: String,

    /// Port to connect to
    #[arg(long, default_value_t = 5432)]
    pub port: u16,

    /// Database schema to connect to
    #[arg(short, long, default_value = "postgres")]
    pub database: String,

    /// SSL mode for connecting to postgres
    #[arg(short, long, default_value = "prefer")]
    pub sslmode: String,
}

/// Thresholds for the connections check.
#[derive(Debug, Clone, Copy, clap::Args)]
pub struct ThresholdConfig {
    /// Warning threshold number or % of connections
    #[arg(short, long, default_value_t = 200)]
    pub warning: i64,

    /// Critical threshold number or % of connections
    #[arg(short, long, default_value_t = 250)]
    pub critical: i64,

    /// Use percentage of defined max connections instead of absolute value
    #[arg(long, default_value_t = false)]
    pub percentage: bool,
}
