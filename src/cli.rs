//! Command-line interface definition for Sleuth
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand};

/// Sleuth - ask a hosted assistant over HTTP
#[derive(Parser, Debug, Clone)]
#[command(name = "sleuth")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "SLEUTH_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Sleuth
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Interface to bind (overrides config and SLEUTH_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Ask a single question from the terminal
    Ask {
        /// Question to ask; prompted for interactively when omitted
        #[arg(short, long)]
        question: Option<String>,
    },

    /// Show the assistant record, provisioning the assistant if needed
    Assistant,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
