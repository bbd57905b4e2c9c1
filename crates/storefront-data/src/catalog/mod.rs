//! Product catalog sources.

mod fixture;
mod remote;
pub mod wire;

pub use fixture::StaticCatalog;
pub use remote::{CatalogClient, DEFAULT_CATALOG_URL};

use async_trait::async_trait;
use storefront_commerce::prelude::*;

use crate::FetchError;

/// Where products come from.
///
/// Pages are 1-based. Implementations reject `page == 0` and
/// `page_size == 0` before doing any I/O.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch one page of the catalog listing.
    async fn list_products(&self, page: u32, page_size: u32) -> Result<ProductPage, FetchError>;

    /// Fetch a single product by id.
    async fn get_product(&self, id: &ProductId) -> Result<Product, FetchError>;
}

pub(crate) fn validate_paging(page: u32, page_size: u32) -> Result<(), FetchError> {
    if page == 0 {
        return Err(FetchError::RequestError("page must be at least 1".into()));
    }
    if page_size == 0 {
        return Err(FetchError::RequestError("page size must be at least 1".into()));
    }
    Ok(())
}
