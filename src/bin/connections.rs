use clap::Parser;
use postgres_checks::check::{self, Outcome};
use postgres_checks::config::{ConnectionConfig, ThresholdConfig};
use tracing::{level_filters::LevelFilter, trace};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

/// postgres connections check
#[derive(Debug, Clone, Parser)]
#[command(name = "check-postgres-connections")]
struct Args {
    #[command(flatten)]
    connection: ConnectionConfig,

    #[command(flatten)]
    thresholds: ThresholdConfig,

    /// Overall check timeout in seconds
    #[arg(long, default_value_t = 15)]
    timeout: u64,
}

fn init() {
    dotenv::dotenv().ok();

    // diagnostics go to stderr; stdout is reserved for the check message
    let filter = filter::Targets::new().with_targets(vec![
        ("postgres_checks", LevelFilter::WARN),
        ("check_postgres_connections", LevelFilter::WARN),
    ]);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_ansi(false),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() {
    init();
    let args = Args::parse();
    trace!("started with args: {args:?}");

    if let Err(e) = check::validate(&args.connection) {
        check::report(&Outcome::critical(e.to_string()));
    }

    let outcome = check::run(
        args.timeout,
        check::execute_connections(&args.connection, &args.thresholds),
    )
    .await;
    check::report(&outcome);
}
