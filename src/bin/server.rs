//! ncpr-index Server Binary
//!
//! Loads every shard into memory, then serves the HTTP lookup endpoint.

use std::sync::Arc;

use clap::Parser;
use ncpr_index::network::Server;
use ncpr_index::{Config, ShardCatalog, ValidationMode};
use tracing_subscriber::{fmt, EnvFilter};

/// ncpr-index Server
#[derive(Parser, Debug)]
#[command(name = "ncpr-server")]
#[command(about = "HTTP lookup service over a sharded subscriber status index")]
#[command(version)]
struct Args {
    /// Directory containing <prefix>.<ext> shard files
    #[arg(short, long, default_value = "/opt/data/ncpr", env = "NCPR_DATA_DIR")]
    data_dir: String,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "0.0.0.0:8080", env = "NCPR_LISTEN")]
    listen: String,

    /// Shard file extension
    #[arg(short, long, default_value = "dat", env = "NCPR_EXTENSION")]
    extension: String,

    /// Serve structurally invalid shards instead of refusing to start
    #[arg(long)]
    lenient: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ncpr_index=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("ncpr-index Server v{}", ncpr_index::VERSION);
    tracing::info!("Data directory: {}", args.data_dir);
    tracing::info!("Listen address: {}", args.listen);

    let validation = if args.lenient {
        ValidationMode::Lenient
    } else {
        ValidationMode::Strict
    };

    // Build config from args
    let config = Config::builder()
        .data_dir(&args.data_dir)
        .listen_addr(&args.listen)
        .shard_extension(&args.extension)
        .validation(validation)
        .build();

    // Load catalog before accepting any request
    let catalog = match ShardCatalog::load(&config) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            tracing::error!("Failed to load shards: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Catalog ready: {} shards, {} bytes resident",
        catalog.len(),
        catalog.resident_bytes()
    );

    let server = Server::new(config, catalog);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
