//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, StorefrontConfig, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force, format } => init_config(force, &format, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    let catalog = &ctx.config.catalog;
    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv("base_url", &catalog.base_url);
    ctx.output.kv("timeout_secs", &catalog.timeout_secs.to_string());
    ctx.output
        .kv("connect_timeout_secs", &catalog.connect_timeout_secs.to_string());
    ctx.output.kv("currency", &catalog.currency);
    if let Some(ref fixture) = catalog.fixture {
        ctx.output.kv("fixture", fixture);
    }

    ctx.output.info("");
    ctx.output.info("[listing]");
    ctx.output
        .kv("page_size", &ctx.config.listing.page_size.to_string());

    Ok(())
}

async fn init_config(force: bool, format: &str, ctx: &Context) -> Result<()> {
    let name = if format == "json" {
        CONFIG_NAMES[2]
    } else {
        CONFIG_NAMES[0]
    };
    let config_path = ctx.cwd.join(name);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if format == "json" {
        StorefrontConfig::default().save(&config_path.to_string_lossy())?;
    } else {
        fs::write(&config_path, generate_default_config())?;
    }

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let report = ctx.config.check(&ctx.config_dir());

    if report.is_clean() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &report.errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &report.warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !report.errors.is_empty() {
        bail!("Configuration has {} error(s)", report.errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
