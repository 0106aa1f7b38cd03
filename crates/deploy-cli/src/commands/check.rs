//! Provisioning-readiness check command

use colored::Colorize;
use deploy_core::{ResolvedConfig, StackContext};

use crate::error::{CliError, Result};

/// Validate environments for provisioning readiness
///
/// Checks the named environments, or every configured one when `targets` is
/// empty. Returns an error (non-zero exit) when any environment fails.
pub fn run_check(config: &ResolvedConfig, targets: &[String]) -> Result<()> {
    let names: Vec<String> = if targets.is_empty() {
        config
            .environment_names()
            .into_iter()
            .map(str::to_owned)
            .collect()
    } else {
        targets.to_vec()
    };

    if names.is_empty() {
        return Err(CliError::user(
            "No environments configured. Add one (e.g. \"dev\") to the config file.",
        ));
    }

    println!("{}", "Environment Check".bold());
    println!();

    let mut failures = 0;
    for name in &names {
        match StackContext::from_resolved(config, name) {
            Ok(stack) => {
                println!(
                    "  {} {} ({}, {})",
                    "ok".green().bold(),
                    name,
                    stack.platform,
                    stack.fqdn
                );
            }
            Err(e) => {
                failures += 1;
                println!("  {} {}: {}", "fail".red().bold(), name, e);
            }
        }
    }

    if failures > 0 {
        println!();
        return Err(CliError::user(format!(
            "{failures} environment(s) failed validation"
        )));
    }

    Ok(())
}
