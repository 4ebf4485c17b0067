//! lcu-bridge binary entry point.

use std::process::ExitCode;
use std::sync::Arc;

use lcu_bridge::cli::{self, Args};
use lcu_bridge::config::Config;
use lcu_bridge::ingest::{EventFeed, FeedSource};
use lcu_bridge::{logging, EventIngestor, SnapshotServer, StateStore};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Run with --help for usage.");
            return ExitCode::from(2);
        }
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }

    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Ignore a subscriber installed by the embedding environment
    let _ = logging::init_with_filter(config.log_filter());

    match run(&args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args, config: Config) -> lcu_bridge::Result<()> {
    info!("lcu-bridge v{}", env!("CARGO_PKG_VERSION"));

    // Validate the address now rather than on the first connection.
    let server_config = config.to_server_config()?;

    let store = Arc::new(StateStore::with_snapshot(config.initial_snapshot()));
    let server = Arc::new(SnapshotServer::new(server_config, Arc::clone(&store)));
    let ingestor = EventIngestor::new(store, Arc::clone(&server));

    let feed = EventFeed::open(&FeedSource::from_arg(args.feed.as_deref())).await?;
    info!(
        "Snapshot server will listen on {} once the client connects",
        server.config().bind_address()
    );

    tokio::select! {
        result = feed.run(&ingestor) => {
            result?;
        }
        err = server.failure() => return Err(err),
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, shutting down");
            return Ok(());
        }
    }

    if !server.is_started() {
        warn!("Event feed ended before the client connected; nothing to serve");
        return Ok(());
    }

    // The feed is done but pollers may still want the last known state.
    info!("Serving last known state until interrupted");
    tokio::select! {
        err = server.failure() => Err(err),
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, shutting down");
            Ok(())
        }
    }
}
