//! deploy-manager CLI
//!
//! The command-line interface for resolving and inspecting deployment
//! environment configuration.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use deploy_core::ConfigResolver;
use serde_json::Value;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    // Execute command
    match &cli.command {
        Some(cmd) => execute_command(&cli, cmd.clone()),
        None => {
            // No command provided - show help hint
            println!("{} deploy-manager CLI", "deploy".green().bold());
            println!();
            println!("Run {} for available commands.", "deploy --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cli: &Cli, cmd: Commands) -> Result<()> {
    let config = build_resolver(cli)?.resolve()?;

    match cmd {
        Commands::Show { json } => commands::run_show(&config, json),
        Commands::Check { environments } => commands::run_check(&config, &environments),
        Commands::Environments { json } => commands::run_environments(&config, json),
    }
}

/// Build a resolver from CLI flags
///
/// The `--context` flag carries an inline JSON object that becomes the sole
/// configuration source, suppressing the file and environment tiers.
fn build_resolver(cli: &Cli) -> Result<ConfigResolver> {
    let mut resolver = ConfigResolver::new(&cli.root);

    if let Some(raw) = &cli.context {
        match serde_json::from_str::<Value>(raw)? {
            Value::Object(map) => resolver = resolver.with_context(map),
            _ => {
                return Err(CliError::user(
                    "--context must be a JSON object, e.g. '{\"account\": \"123\"}'",
                ));
            }
        }
    }

    Ok(resolver)
}
