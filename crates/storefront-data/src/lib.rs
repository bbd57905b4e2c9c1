//! Catalog access for the storefront.
//!
//! A small fetch layer over `reqwest` plus the [`CatalogSource`] trait and
//! its two implementations: [`CatalogClient`] for the HTTP catalog and
//! [`StaticCatalog`] for in-memory or fixture-backed catalogs.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_data::{CatalogClient, CatalogSource, DEFAULT_CATALOG_URL};
//!
//! let catalog = CatalogClient::new(DEFAULT_CATALOG_URL)?;
//! let page = catalog.list_products(1, 12).await?;
//! for product in &page.products {
//!     println!("{} {}", product.title, product.price);
//! }
//! ```

mod client;
mod error;
mod response;
mod timeout;

pub mod catalog;

pub use catalog::{CatalogClient, CatalogSource, StaticCatalog, DEFAULT_CATALOG_URL};
pub use client::{ClientRequestBuilder, FetchClient, FetchClientBuilder};
pub use error::FetchError;
pub use response::Response;
pub use timeout::TimeoutConfig;
