//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// deploy-manager - Resolve and inspect deployment environment configuration
#[derive(Parser, Debug)]
#[command(name = "deploy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root containing config/app-config.json
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Inline JSON object overriding every other configuration source
    #[arg(short, long, global = true)]
    pub context: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show the resolved configuration
    ///
    /// Resolves context, config file, and environment variables in
    /// precedence order and prints the result.
    ///
    /// Examples:
    ///   deploy show                  # Human-readable output
    ///   deploy show --json           # Machine-readable output
    Show {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Check environments for provisioning readiness
    ///
    /// Validates that each environment entry carries the fields the
    /// provisioning layer requires. Exits non-zero when any fails.
    ///
    /// Examples:
    ///   deploy check                 # Check every environment
    ///   deploy check dev             # Check only "dev"
    Check {
        /// Environment keys to check (all when omitted)
        environments: Vec<String>,
    },

    /// List configured deployment environments
    Environments {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
