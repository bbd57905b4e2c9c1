//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::prelude::*;
use storefront_data::{TimeoutConfig, DEFAULT_CATALOG_URL};
use url::Url;

/// Config file names, in lookup order.
pub const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorefrontConfig {
    /// Catalog connection.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Product list paging.
    #[serde(default)]
    pub listing: ListingConfig,
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Check the config for problems.
    ///
    /// Relative fixture paths are resolved against `base_dir`.
    pub fn check(&self, base_dir: &Path) -> ConfigReport {
        let mut report = ConfigReport::default();
        let catalog = &self.catalog;

        match Url::parse(&catalog.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => report.errors.push(format!(
                "catalog.base_url must be http or https, got '{}'",
                url.scheme()
            )),
            Err(e) => report
                .errors
                .push(format!("catalog.base_url is not a valid URL: {}", e)),
        }

        if catalog.timeout_secs == 0 {
            report.errors.push("catalog.timeout_secs must be greater than 0".to_string());
        }
        if catalog.connect_timeout_secs == 0 {
            report
                .errors
                .push("catalog.connect_timeout_secs must be greater than 0".to_string());
        }
        if catalog.connect_timeout_secs > catalog.timeout_secs {
            report.warnings.push(
                "catalog.connect_timeout_secs exceeds catalog.timeout_secs".to_string(),
            );
        }

        if Currency::from_code(&catalog.currency).is_none() {
            report
                .errors
                .push(format!("catalog.currency '{}' is not supported", catalog.currency));
        }

        if let Some(ref fixture) = catalog.fixture {
            let path = base_dir.join(fixture);
            if !path.is_file() {
                report
                    .errors
                    .push(format!("catalog.fixture not found: {}", path.display()));
            } else {
                report.warnings.push(format!(
                    "catalog.fixture is set; {} will not be contacted",
                    catalog.base_url
                ));
            }
        }

        if self.listing.page_size == 0 {
            report.errors.push("listing.page_size must be at least 1".to_string());
        }

        report
    }
}

/// Problems found by [`StorefrontConfig::check`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ConfigReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Catalog connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Products endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Total request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Currency the catalog prices are in.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Read products from this JSON file instead of the catalog service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixture: Option<String>,
}

impl CatalogConfig {
    pub fn timeouts(&self) -> TimeoutConfig {
        TimeoutConfig::from_secs(self.connect_timeout_secs, self.timeout_secs)
    }

    pub fn currency(&self) -> Result<Currency> {
        Ok(self.currency.parse::<Currency>()?)
    }
}

fn default_base_url() -> String {
    DEFAULT_CATALOG_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            currency: default_currency(),
            fixture: None,
        }
    }
}

/// Product list settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingConfig {
    /// Products per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Storefront configuration

[catalog]
base_url = "{base_url}"
timeout_secs = 10
connect_timeout_secs = 5
currency = "USD"
# Read the catalog from a local file instead:
# fixture = "products.json"

[listing]
page_size = {page_size}
"#,
        base_url = DEFAULT_CATALOG_URL,
        page_size = DEFAULT_PAGE_SIZE
    )
}
