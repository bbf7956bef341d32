//! CLI for the graphmock mock generator.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use graphmock_core::config;
use std::path::PathBuf;

use commands::{run_combine, run_generate, run_sanitize};

/// Top-level CLI for the graphmock mock generator.
#[derive(Debug, Parser)]
#[command(name = "graphmock")]
#[command(about = "graphmock: Graph API proxy mocks from documented requests", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Scan a docs directory and generate a proxy mock file.
    Generate {
        /// Directory containing the markdown API docs.
        docs_path: PathBuf,

        /// Path of the mock file to write.
        output_file: PathBuf,

        /// Graph API version used when a URL carries none (overrides config).
        #[arg(long, value_name = "VERSION")]
        graph_version: Option<String>,

        /// Drop requests whose URL cannot be sanitized instead of aborting.
        #[arg(long)]
        skip_failures: bool,
    },

    /// Merge several mock files, deduplicating by URL and method.
    Combine {
        /// Mock files to merge, in priority order (first occurrence wins).
        inputs: Vec<PathBuf>,

        /// Path of the combined mock file to write.
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Sanitize a single request URL and print the result.
    Sanitize {
        /// Absolute or server-relative Graph request URL.
        url: String,

        /// Print the wildcard (masked) form used for mock matching.
        #[arg(long)]
        wildcard: bool,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Generate {
                docs_path,
                output_file,
                graph_version,
                skip_failures,
            } => run_generate(&cfg, &docs_path, &output_file, graph_version, skip_failures)?,
            CliCommand::Combine { inputs, output } => run_combine(&inputs, &output)?,
            CliCommand::Sanitize { url, wildcard } => run_sanitize(&cfg, &url, wildcard)?,
        }

        Ok(())
    }
}
