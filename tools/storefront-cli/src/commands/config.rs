//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    let config = &ctx.config;
    ctx.output.header("Current Configuration");

    ctx.output.info("[site]");
    ctx.output.kv("name", &config.site.name);
    ctx.output.kv("url", &config.site.url);
    if let Some(ref desc) = config.site.description {
        ctx.output.kv("description", desc);
    }

    ctx.output.info("[cms]");
    ctx.output.kv("wp_url", &config.cms.wp_url);
    ctx.output.kv("graphql_endpoint", &config.cms.graphql_endpoint);
    ctx.output.kv("store_api_path", &config.cms.store_api_path);

    ctx.output.info("[localization]");
    ctx.output.kv("language", &config.localization.language);
    ctx.output.kv("currency", config.currency().code());

    ctx.output.info("[cache]");
    ctx.output
        .kv("default_revalidate", &config.cache.default_revalidate.to_string());
    ctx.output.kv("product", &config.cache.product.to_string());
    ctx.output.kv("category", &config.cache.category.to_string());

    ctx.output.info("[cart]");
    ctx.output.kv("storage_dir", &ctx.cart_dir().display().to_string());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("storefront.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let name = ctx
        .cwd
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("My Storefront");

    fs::write(&config_path, generate_default_config(name))
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));
    Ok(())
}
