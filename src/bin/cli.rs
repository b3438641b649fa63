//! SweepKV CLI
//!
//! Command-line interface over an on-disk SweepKV store.

use std::process;

use clap::{Parser, Subcommand};
use sweepkv::{Config, Engine, SyncStrategy};
use tracing_subscriber::{fmt, EnvFilter};

/// SweepKV CLI
#[derive(Parser, Debug)]
#[command(name = "sweepkv-cli")]
#[command(about = "CLI for the SweepKV ordered key-value store")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./sweepkv_data")]
    data_dir: String,

    /// Persist commits eventually instead of on every commit
    #[arg(long)]
    eventual: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Get many values in one sweep
    Mget {
        /// The keys to get
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Set a key-value pair
    Put {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Set many pairs in one batch, given as KEY=VALUE
    Mput {
        #[arg(required = true)]
        pairs: Vec<String>,
    },

    /// Delete one or more keys in one transaction
    Del {
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// List keys under a prefix
    Scan {
        /// Key prefix (empty for every key)
        #[arg(default_value = "")]
        prefix: String,

        /// Print values too
        #[arg(short, long)]
        values: bool,
    },

    /// Delete every key under a prefix
    Dscan {
        prefix: String,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sweepkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let sync_strategy = if args.eventual {
        SyncStrategy::Eventual
    } else {
        SyncStrategy::EveryCommit
    };
    let config = Config::builder()
        .data_dir(&args.data_dir)
        .sync_strategy(sync_strategy)
        .build();

    let engine = match Engine::open(config) {
        Ok(e) => e,
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            process::exit(1);
        }
    };

    let outcome = run(&engine, args.command);
    if let Err(e) = engine.close() {
        tracing::warn!("Failed to close store: {}", e);
    }

    if let Err(e) = outcome {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(engine: &Engine, command: Commands) -> sweepkv::Result<()> {
    match command {
        Commands::Get { key } => {
            let value = engine.read(key.as_bytes())?;
            println!("{}", String::from_utf8_lossy(&value));
        }
        Commands::Mget { keys } => {
            let values = engine.read_all(&keys)?;
            for (key, value) in keys.iter().zip(values) {
                match value {
                    Some(value) => println!("{}\t{}", key, String::from_utf8_lossy(&value)),
                    None => println!("{}\t(not found)", key),
                }
            }
        }
        Commands::Put { key, value } => {
            engine.write(key.as_bytes(), value.as_bytes())?;
        }
        Commands::Mput { pairs } => {
            let mut keys = Vec::with_capacity(pairs.len());
            let mut values = Vec::with_capacity(pairs.len());
            for pair in &pairs {
                let (key, value) = pair.split_once('=').ok_or_else(|| {
                    sweepkv::SweepError::invalid_argument(format!(
                        "expected KEY=VALUE, got {:?}",
                        pair
                    ))
                })?;
                keys.push(key);
                values.push(value);
            }
            engine.write_all(&keys, &values)?;
        }
        Commands::Del { keys } => {
            engine.delete_all(&keys)?;
        }
        Commands::Scan { prefix, values } => {
            if values {
                for (key, value) in engine.read_scan(prefix.as_bytes())? {
                    println!(
                        "{}\t{}",
                        String::from_utf8_lossy(&key),
                        String::from_utf8_lossy(&value)
                    );
                }
            } else {
                for key in engine.scan(prefix.as_bytes())? {
                    println!("{}", String::from_utf8_lossy(&key));
                }
            }
        }
        Commands::Dscan { prefix } => {
            let deleted = engine.delete_scan(prefix.as_bytes())?;
            println!("deleted {} keys", deleted.len());
        }
    }
    Ok(())
}
