// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axiom_cli::commands::{alerts, fingerprint, history, inspect, prove, verify};
use axiom_kernel::config::DEFAULT_DIVERGENCE_THRESHOLD;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "axiom")]
#[command(about = "Axiom Forensic CLI - offline view of the integrity auditor's store", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show collections, their integrity and the protocol status
    Inspect {
        /// Store directory (AXIOM_STORE_DIR of the node)
        #[arg(long, short, default_value = "./axiom-data")]
        dir: PathBuf,
    },
    /// List recent audits
    History {
        #[arg(long, short, default_value = "./axiom-data")]
        dir: PathBuf,

        #[arg(long, short, default_value_t = 24)]
        limit: usize,
    },
    /// List CORE_DRIFT alerts
    Alerts {
        #[arg(long, short, default_value = "./axiom-data")]
        dir: PathBuf,
    },
    /// Verify every log frame and document checksum
    Verify {
        #[arg(long, short, default_value = "./axiom-data")]
        dir: PathBuf,
    },
    /// Compute the fingerprint of a configuration file
    Fingerprint {
        #[arg(long, short)]
        config: PathBuf,
    },
    /// Emit a JSON divergence proof against an anchored hash
    Prove {
        #[arg(long, short)]
        config: PathBuf,

        /// Anchored hash as 0x-prefixed hex
        #[arg(long, short)]
        anchor: String,

        #[arg(long, short, default_value_t = DEFAULT_DIVERGENCE_THRESHOLD)]
        threshold: f64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { dir } => inspect::run(&dir),
        Commands::History { dir, limit } => history::run(&dir, limit).map(|_| ()),
        Commands::Alerts { dir } => alerts::run(&dir).map(|_| ()),
        Commands::Verify { dir } => verify::run(&dir),
        Commands::Fingerprint { config } => fingerprint::run(&config).map(|_| ()),
        Commands::Prove {
            config,
            anchor,
            threshold,
        } => prove::run(&config, &anchor, threshold).map(|_| ()),
    }
}
