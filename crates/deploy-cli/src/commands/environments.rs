//! Environment listing command

use colored::Colorize;
use deploy_core::ResolvedConfig;

use crate::error::Result;

/// List configured deployment environments
pub fn run_environments(config: &ResolvedConfig, json: bool) -> Result<()> {
    if json {
        let entries: Vec<_> = config
            .environment_names()
            .into_iter()
            .map(|name| {
                let env = &config.environments[name];
                serde_json::json!({
                    "name": name,
                    "computePlatform": env.compute_platform,
                    "stagingEnvironment": env.staging_environment,
                    "imageTag": env.image_tag,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if config.environments.is_empty() {
        println!("{}", "No environments configured".dimmed());
        return Ok(());
    }

    println!("{}", "Deployment Environments".bold());
    println!();
    for name in config.environment_names() {
        let env = &config.environments[name];
        let platform = env.compute_platform.as_deref().unwrap_or("?");
        let staging = env.staging_environment.as_deref().unwrap_or("?");
        let tag = env
            .image_tag
            .as_deref()
            .map(|t| format!(" [{t}]"))
            .unwrap_or_default();
        println!("  {} {} ({}, {}){}", "+".green(), name.cyan(), platform, staging, tag);
    }

    Ok(())
}
