//! HTTP catalog client.

use async_trait::async_trait;
use storefront_commerce::prelude::*;
use tracing::debug;
use url::Url;

use super::wire::{WireProduct, WireProductList};
use super::{validate_paging, CatalogSource};
use crate::{FetchClient, FetchError, TimeoutConfig};

/// Default catalog endpoint.
pub const DEFAULT_CATALOG_URL: &str = "https://dummyjson.com/products";

/// Catalog backed by a dummyjson-style HTTP service.
///
/// `GET {base}?limit=N&skip=M` lists a page and `GET {base}/{id}` fetches one
/// product. Failures are surfaced as-is; nothing is retried.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: FetchClient,
    base_url: Url,
    currency: Currency,
}

impl CatalogClient {
    /// Create a client for `base_url` with default timeouts.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Self::with_timeouts(base_url, TimeoutConfig::default())
    }

    pub fn with_timeouts(base_url: &str, timeouts: TimeoutConfig) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                base_url.scheme()
            )));
        }
        let client = FetchClient::builder()
            .base_url(base_url.as_str())
            .timeouts(timeouts)
            .build()?;
        Ok(Self {
            client,
            base_url,
            currency: Currency::default(),
        })
    }

    /// Price products in `currency` instead of USD.
    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL for one listing page.
    pub fn list_url(&self, page: u32, page_size: u32) -> Result<Url, FetchError> {
        validate_paging(page, page_size)?;
        let skip = u64::from(page - 1) * u64::from(page_size);
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("limit", &page_size.to_string())
            .append_pair("skip", &skip.to_string());
        Ok(url)
    }

    /// URL for one product.
    pub fn product_url(&self, id: &ProductId) -> Result<Url, FetchError> {
        if id.as_str().is_empty() {
            return Err(FetchError::NotFound(String::new()));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?
            .push(id.as_str());
        Ok(url)
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn list_products(&self, page: u32, page_size: u32) -> Result<ProductPage, FetchError> {
        let url = self.list_url(page, page_size)?;
        debug!(page, page_size, "listing products");

        let list: WireProductList = self
            .client
            .get(url.as_str())?
            .send()
            .await?
            .error_for_status()?
            .json()?;
        list.into_page(self.currency)
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, FetchError> {
        let url = self.product_url(id)?;
        debug!(%id, "fetching product");

        let response = self.client.get(url.as_str())?.send().await?;
        if response.status == 404 {
            return Err(FetchError::NotFound(id.to_string()));
        }
        let product: WireProduct = response.error_for_status()?.json()?;
        product.into_product(self.currency)
    }
}
