//! ncpr-index CLI
//!
//! Offline tooling: look up a single number, patch shards from CSV, and
//! inspect a shard file.

use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use ncpr_index::{patch, Config, NcprError, Result, Shard, ShardCatalog, SubscriberNumber};
use tracing_subscriber::{fmt, EnvFilter};

/// ncpr-index CLI
#[derive(Parser, Debug)]
#[command(name = "ncpr-cli")]
#[command(about = "CLI for the sharded subscriber status index")]
struct Args {
    /// Directory containing <prefix>.<ext> shard files
    #[arg(short, long, default_value = "/opt/data/ncpr", env = "NCPR_DATA_DIR")]
    data_dir: String,

    /// Shard file extension
    #[arg(short, long, default_value = "dat", env = "NCPR_EXTENSION")]
    extension: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up one ten-digit number
    Search {
        /// The number to look up
        number: String,
    },

    /// Apply CSV rows from stdin (provider,number,networks,status,subtype)
    Patch,

    /// Show layout and validation status of one shard
    Inspect {
        /// Four-digit prefix of the shard
        prefix: u16,
    },
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::builder()
        .data_dir(&args.data_dir)
        .shard_extension(&args.extension)
        .build();

    match run(&config, args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, command: Commands) -> Result<()> {
    match command {
        Commands::Search { number } => {
            let number = SubscriberNumber::parse(&number)?;

            // Only the one shard this number lives in, chosen as the server would
            let record = match ShardCatalog::shard_file(config, number.prefix())? {
                Some(path) => Shard::open(&path)?.lookup(number.suffix()),
                None => None,
            };

            match record {
                Some(record) => println!("{}", record),
                None => println!("None"),
            }
        }
        Commands::Patch => {
            tracing::info!("Reading CSV from stdin");
            let summary = patch::apply(io::stdin().lock(), config)?;
            println!(
                "patched {} records in {} files, skipped {} rows",
                summary.records_applied, summary.files_written, summary.rows_skipped
            );
        }
        Commands::Inspect { prefix } => {
            let path = ShardCatalog::shard_file(config, prefix)?.ok_or_else(|| {
                NcprError::Io(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no shard file for prefix {}", prefix),
                ))
            })?;
            let shard = Shard::open(&path)?;

            println!("path:     {}", path.display());
            println!("layout:   {}", shard.layout());
            println!("bytes:    {}", shard.len());
            println!("entries:  {}", shard.record_count());
            println!("filled:   {}", shard.records().count());
            match shard.validate() {
                Ok(()) => println!("valid:    yes"),
                Err(defect) => println!("valid:    no ({})", defect),
            }
        }
    }

    Ok(())
}
