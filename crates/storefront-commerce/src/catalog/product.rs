//! Catalog product and listing page types.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product as delivered by the catalog service.
///
/// Products are read-only on this side; the cart copies what it needs at
/// add-time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: Money,
    /// Units available; the most a cart line may hold.
    pub stock: i64,
    /// Thumbnail image URL.
    #[serde(default)]
    pub thumbnail: String,
    /// Full description, shown on the detail view.
    #[serde(default)]
    pub description: String,
}

impl Product {
    /// Create a product with no thumbnail or description.
    ///
    /// Negative stock is treated as none in stock, and a negative price as
    /// free.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        price: Money,
        stock: i64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price: Money::new(price.amount_cents.max(0), price.currency),
            stock: stock.max(0),
            thumbnail: String::new(),
            description: String::new(),
        }
    }

    /// Set the thumbnail URL.
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = thumbnail.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check if at least one unit is available.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// One page of the catalog listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProductPage {
    /// Products on this page, in catalog order.
    pub products: Vec<Product>,
    /// Total number of products in the catalog.
    pub total: u64,
    /// Offset of the first product on this page.
    pub skip: u64,
    /// Requested page size.
    pub limit: u32,
}

impl ProductPage {
    /// Check if the page holds no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Number of products on this page.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Find a product on this page by id.
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }
}
