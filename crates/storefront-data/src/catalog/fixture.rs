//! In-memory catalog, optionally loaded from a JSON fixture.

use std::path::Path;

use async_trait::async_trait;
use storefront_commerce::prelude::*;
use tracing::debug;

use super::wire::WireProductList;
use super::{validate_paging, CatalogSource};
use crate::FetchError;

/// A catalog served from memory.
///
/// Used for offline browsing and in tests. Paging follows the same
/// `limit`/`skip` arithmetic as the HTTP catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Load a fixture file in the dummyjson listing format.
    pub async fn from_file(path: impl AsRef<Path>, currency: Currency) -> Result<Self, FetchError> {
        let path = path.as_ref();
        let fixture_err = |message: String| FetchError::Fixture {
            path: path.display().to_string(),
            message,
        };

        let raw = tokio::fs::read(path)
            .await
            .map_err(|e| fixture_err(e.to_string()))?;
        let list: WireProductList =
            serde_json::from_slice(&raw).map_err(|e| fixture_err(e.to_string()))?;

        let page = list
            .into_page(currency)
            .map_err(|e| fixture_err(e.to_string()))?;
        debug!(path = %path.display(), products = page.len(), "loaded catalog fixture");
        Ok(Self::new(page.products))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn list_products(&self, page: u32, page_size: u32) -> Result<ProductPage, FetchError> {
        validate_paging(page, page_size)?;
        let skip = u64::from(page - 1) * u64::from(page_size);
        let products = self
            .products
            .iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(page_size as usize)
            .cloned()
            .collect();

        Ok(ProductPage {
            products,
            total: self.products.len() as u64,
            skip,
            limit: page_size,
        })
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, FetchError> {
        self.products
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn catalog(n: u64) -> StaticCatalog {
        StaticCatalog::new(
            (1..=n)
                .map(|i| Product::new(i, format!("Product {}", i), Money::new(100 * i as i64, Currency::USD), 5))
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_pages_through_catalog() {
        let catalog = catalog(30);

        let first = catalog.list_products(1, 12).await.unwrap();
        assert_eq!(first.len(), 12);
        assert_eq!(first.total, 30);
        assert_eq!(first.skip, 0);
        assert_eq!(first.products[0].id.as_str(), "1");

        let last = catalog.list_products(3, 12).await.unwrap();
        assert_eq!(last.len(), 6);
        assert_eq!(last.skip, 24);
        assert_eq!(last.products[0].id.as_str(), "25");
    }

    #[tokio::test]
    async fn test_page_past_end_is_empty() {
        let page = catalog(5).list_products(4, 12).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total, 5);
    }

    #[tokio::test]
    async fn test_invalid_paging_rejected() {
        assert!(catalog(5).list_products(0, 12).await.is_err());
        assert!(catalog(5).list_products(1, 0).await.is_err());
    }

    #[tokio::test]
    async fn test_get_product() {
        let catalog = catalog(3);
        let product = catalog.get_product(&ProductId::from(2u64)).await.unwrap();
        assert_eq!(product.title, "Product 2");

        let missing = catalog.get_product(&ProductId::from(99u64)).await;
        assert!(matches!(missing, Err(FetchError::NotFound(id)) if id == "99"));
    }

    #[tokio::test]
    async fn test_load_fixture_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"products": [
                {{"id": 1, "title": "Lamp", "price": 24.5, "stock": 3}},
                {{"id": 2, "title": "Rug", "price": 120, "stock": 0}}
            ], "total": 2, "skip": 0, "limit": 30}}"#
        )
        .unwrap();

        let catalog = StaticCatalog::from_file(file.path(), Currency::GBP).await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.products()[0].price, Money::new(2450, Currency::GBP));
        assert!(!catalog.products()[1].is_in_stock());
    }

    #[tokio::test]
    async fn test_missing_fixture_reports_path() {
        let err = StaticCatalog::from_file("/nonexistent/catalog.json", Currency::USD)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Fixture { ref path, .. } if path == "/nonexistent/catalog.json"));
    }
}
