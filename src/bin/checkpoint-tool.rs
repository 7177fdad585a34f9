#![forbid(unsafe_code)]
//! Inspect and exercise the checkpoint gate from the shell

use clap::{Parser, Subcommand};
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use finality_gate::config::load_config;
use finality_gate::loader::{CheckpointLoader, HashFile};
use finality_gate::params::NetworkParams;
use finality_gate::{BlockHash, CheckpointStore, NetworkType};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,
    /// Override the configured network (mainnet, testnet, stagenet)
    #[arg(long)]
    network: Option<NetworkType>,
    /// Override the configured checkpoint hash file
    #[arg(long)]
    checkpoints_file: Option<PathBuf>,
    /// Also load DNS checkpoints
    #[arg(long)]
    dns: bool,
    /// Pre-fetched DNS TXT records, one "<height>:<hash>" per line. Used in
    /// place of a DNS lookup, even when no DNS domains are configured
    #[arg(long)]
    dns_records: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lists every loaded checkpoint
    List,
    /// Checks a block hash against the checkpoint at its height
    Check {
        #[arg(long)]
        height: u64,
        #[arg(long)]
        hash: BlockHash,
    },
    /// Asks whether a block on a competing branch may be accepted
    Alt {
        #[arg(long)]
        chain_height: u64,
        #[arg(long)]
        candidate_height: u64,
    },
    /// Reports whether a height lies inside the checkpoint zone
    Zone {
        #[arg(long)]
        height: u64,
    },
    /// Writes the loaded checkpoints as a JSON hash file
    Export {
        #[arg(long)]
        out: PathBuf,
    },
    /// Shows the protocol version scheduled at a height
    Hardfork {
        #[arg(long)]
        height: u64,
    },
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let network = match cli.network {
        Some(network) => network,
        None => config.network_type()?,
    };
    let params = NetworkParams::for_network(network);

    let domains = match &config.checkpoints.dns_domains {
        Some(domains) => domains.clone(),
        None => params.dns_domains(),
    };
    let mut loader = CheckpointLoader::new(network).with_dns_domains(domains);
    if let Some(path) = &cli.dns_records {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read DNS records {}: {}", path.display(), e))?;
        let records = content.lines().map(str::to_string).collect();
        loader = loader.with_prefetched_records(&path.display().to_string(), records);
    }

    let mut store = CheckpointStore::with_params(params)?;
    let file = cli
        .checkpoints_file
        .clone()
        .unwrap_or_else(|| config.checkpoints.file.clone());
    let use_dns = cli.dns || config.checkpoints.use_dns;

    if !loader.load_new_checkpoints(&mut store, &file, use_dns) {
        eprintln!("{}", "Failed to load checkpoints".red().bold());
        return Ok(ExitCode::FAILURE);
    }

    let ok = match cli.command {
        Commands::List => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec![
                    Cell::new("Height").add_attribute(Attribute::Bold),
                    Cell::new("Hash").add_attribute(Attribute::Bold),
                ]);
            for cp in store.iter() {
                table.add_row(vec![cp.height.to_string(), cp.hash.to_hex()]);
            }
            println!("{}", format!("Checkpoints ({})", network).bright_cyan().bold());
            println!("{table}");
            match store.highest_height() {
                Some(max) => println!("{} {}", "Highest checkpoint:".bright_green(), max),
                None => println!("{}", "No checkpoints loaded".yellow()),
            }
            true
        }
        Commands::Check { height, hash } => {
            let check = store.gate().check_block(height, &hash);
            match (check.is_checkpoint, check.accepted) {
                (false, _) => println!("{}", format!("No checkpoint at height {}", height).yellow()),
                (true, true) => println!("{}", format!("Checkpoint passed at height {}", height).green()),
                (true, false) => println!(
                    "{}",
                    format!("Checkpoint FAILED at height {}", height).red().bold()
                ),
            }
            check.accepted
        }
        Commands::Alt {
            chain_height,
            candidate_height,
        } => {
            let allowed = store
                .gate()
                .alternative_block_allowed(chain_height, candidate_height);
            if allowed {
                println!("{}", "Alternative block allowed".green());
            } else {
                println!("{}", "Alternative block rejected".red().bold());
            }
            allowed
        }
        Commands::Zone { height } => {
            if store.in_checkpoint_zone(height) {
                println!("{}", format!("Height {} is inside the checkpoint zone", height).green());
            } else {
                println!("{}", format!("Height {} is outside the checkpoint zone", height).yellow());
            }
            true
        }
        Commands::Export { out } => {
            HashFile::from_store(&store).write(&out)?;
            println!(
                "{}",
                format!("Wrote {} checkpoints to {}", store.len(), out.display()).green()
            );
            true
        }
        Commands::Hardfork { height } => {
            match params.version_at(height) {
                Some(version) => println!("Height {} runs protocol version {}", height, version),
                None => println!("{}", format!("No hard fork scheduled at or before {}", height).yellow()),
            }
            true
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
