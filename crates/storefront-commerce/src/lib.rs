//! Storefront domain types and cart state.
//!
//! This crate provides the pieces of the storefront that carry invariants:
//!
//! - **Catalog**: Products as delivered by the catalog service, listing pages
//!   and the paging state of the product list view
//! - **Cart**: The cart store (add, update, remove, clear, total) with
//!   snapshot-based change notification, and the cart table sort helper
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//!
//! let product = Product::new("1", "Rust Programming Book", Money::new(1000, Currency::USD), 2);
//!
//! let mut cart = CartStore::new();
//! let badge = cart.watch();
//!
//! cart.add_to_cart(&product).unwrap();
//! cart.add_to_cart(&product).unwrap();
//! assert!(cart.add_to_cart(&product).is_err()); // stock exhausted
//!
//! assert_eq!(cart.total(), Money::new(2000, Currency::USD));
//! assert_eq!(badge.latest().map(|s| s.item_count()), Some(2));
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;

pub use error::{CartError, CommerceError};
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CartError, CommerceError};
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{ListingState, Product, ProductPage, DEFAULT_PAGE_SIZE};

    // Cart
    pub use crate::cart::{
        sort_line_items, CartLineItem, CartReceiver, CartSnapshot, CartSort, CartStore,
        SortColumn, SortDirection, SubscriptionId,
    };
}
