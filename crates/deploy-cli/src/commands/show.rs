//! Resolved configuration display command

use colored::Colorize;
use deploy_core::ResolvedConfig;

use crate::error::Result;

/// Display the resolved configuration
pub fn run_show(config: &ResolvedConfig, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("{}", "Resolved Configuration".bold());
    println!();

    println!("  {:<20} {}", "Account:".dimmed(), config.account);
    println!("  {:<20} {}", "Region:".dimmed(), config.region);
    println!("  {:<20} {}", "Service:".dimmed(), config.service_name);
    println!("  {:<20} {}", "Domain:".dimmed(), config.domain_name);
    if config.hosted_zone_id.is_empty() {
        println!("  {:<20} {}", "Hosted zone:".dimmed(), "(none)".dimmed());
    } else {
        println!("  {:<20} {}", "Hosted zone:".dimmed(), config.hosted_zone_id);
    }
    println!("  {:<20} {}", "App port:".dimmed(), config.app_port);
    println!(
        "  {:<20} {} min",
        "Termination wait:".dimmed(),
        config.termination_wait_minutes
    );
    println!(
        "  {:<20} {}",
        "Telemetry:".dimmed(),
        match config.enable_telemetry {
            Some(true) => "enabled".green().to_string(),
            Some(false) => "disabled".to_string(),
            None => "(unset)".dimmed().to_string(),
        }
    );
    println!();

    // Environments
    if config.environments.is_empty() {
        println!("  {:<20} {}", "Environments:".dimmed(), "(none)".dimmed());
    } else {
        println!("  {}:", "Environments".dimmed());
        for name in config.environment_names() {
            let env = &config.environments[name];
            let platform = env.compute_platform.as_deref().unwrap_or("?");
            let staging = env.staging_environment.as_deref().unwrap_or("?");
            println!("    {} {} ({}, {})", "+".green(), name, platform, staging);
        }
    }

    Ok(())
}
