//! CLI command implementations.

pub mod browse;
pub mod config;
pub mod product;
pub mod products;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Page number, starting at 1.
    #[arg(short, long, default_value = "1")]
    pub page: u32,

    /// Products per page (default: from config).
    #[arg(short = 's', long)]
    pub page_size: Option<u32>,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product ID.
    pub id: String,
}

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Page to start on.
    #[arg(short, long, default_value = "1")]
    pub page: u32,

    /// Products per page (default: from config).
    #[arg(short = 's', long)]
    pub page_size: Option<u32>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,

        /// Write storefront.json instead of a commented storefront.toml.
        #[arg(long, value_parser = ["toml", "json"], default_value = "toml")]
        format: String,
    },
    /// Validate the config file.
    Validate,
}
