//! CLI argument definitions using clap
//!
//! Commands:
//! - openmusic init --config <path>
//! - openmusic start --config <path> [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// OpenMusic - REST service for a song catalog
#[derive(Parser, Debug)]
#[command(name = "openmusic")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database and the songs table, then exit
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./openmusic.json")]
        config: PathBuf,
    },

    /// Start the HTTP server
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./openmusic.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
