//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use storefront_commerce::prelude::*;
use storefront_data::{CatalogClient, CatalogSource, StaticCatalog};
use tracing::debug;

use crate::config::{StorefrontConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: StorefrontConfig,
    /// Where the config was read from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (StorefrontConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd)? {
                Some((config, path)) => (config, Some(path)),
                None => (StorefrontConfig::default(), None),
            }
        };

        if let Some(ref path) = config_path {
            debug!(path = %path.display(), "loaded config");
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    ///
    /// The nearest config file wins; one that fails to parse is an error.
    fn find_config(start: &Path) -> Result<Option<(StorefrontConfig, PathBuf)>> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    let path = config_path
                        .to_str()
                        .with_context(|| format!("Non UTF-8 config path: {}", config_path.display()))?;
                    let config = StorefrontConfig::load(path)?;
                    return Ok(Some((config, config_path)));
                }
            }

            if !current.pop() {
                break;
            }
        }

        Ok(None)
    }

    /// Directory relative config paths are resolved against.
    pub fn config_dir(&self) -> PathBuf {
        self.config_path
            .as_ref()
            .and_then(|p| p.parent())
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| self.resolve_path(p))
            .unwrap_or_else(|| self.cwd.clone())
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    pub fn currency(&self) -> Result<Currency> {
        self.config.catalog.currency()
    }

    /// Paging state seeded from config, optionally overridden.
    pub fn listing(&self, page_size: Option<u32>) -> Result<ListingState> {
        let page_size = page_size.unwrap_or(self.config.listing.page_size);
        ListingState::new(page_size).context("Invalid page size")
    }

    /// Build the configured catalog source.
    ///
    /// A configured fixture file wins over the HTTP catalog.
    pub async fn catalog(&self) -> Result<Arc<dyn CatalogSource>> {
        let catalog = &self.config.catalog;
        let currency = self.currency()?;

        if let Some(ref fixture) = catalog.fixture {
            let path = self.config_dir().join(fixture);
            let source = StaticCatalog::from_file(&path, currency)
                .await
                .with_context(|| format!("Failed to load catalog fixture {}", path.display()))?;
            return Ok(Arc::new(source));
        }

        let client = CatalogClient::with_timeouts(&catalog.base_url, catalog.timeouts())
            .with_context(|| format!("Invalid catalog URL: {}", catalog.base_url))?
            .currency(currency);
        Ok(Arc::new(client))
    }
}
