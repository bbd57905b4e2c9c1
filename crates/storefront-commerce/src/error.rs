//! Commerce error types.

use thiserror::Error;

use crate::ids::ProductId;
use crate::money::Currency;

/// Reasons the cart store refuses a mutation.
///
/// A rejected operation leaves the cart untouched and publishes nothing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The line item already holds every unit in stock.
    #[error("Cannot add more of {title}. Stock limit of {stock} reached")]
    StockLimitReached {
        id: ProductId,
        title: String,
        stock: i64,
    },

    /// Quantity below one.
    #[error("Quantity must be at least 1, got {0}")]
    InvalidQuantity(i64),

    /// No line item with this id.
    #[error("Item with id {0} not found in cart")]
    ItemNotInCart(ProductId),

    /// Requested quantity is larger than the stock snapshot.
    #[error("Cannot set quantity to {requested}. Only {stock} items in stock")]
    ExceedsStock {
        id: ProductId,
        requested: i64,
        stock: i64,
    },

    /// Product is priced in a different currency than the cart.
    #[error("Currency mismatch: cart uses {expected}, product is priced in {got}")]
    CurrencyMismatch { expected: Currency, got: Currency },
}

impl CartError {
    /// The product the rejection refers to, when there is one.
    pub fn product_id(&self) -> Option<&ProductId> {
        match self {
            CartError::StockLimitReached { id, .. }
            | CartError::ExceedsStock { id, .. }
            | CartError::ItemNotInCart(id) => Some(id),
            CartError::InvalidQuantity(_) | CartError::CurrencyMismatch { .. } => None,
        }
    }
}

/// Errors from parsing or validating commerce values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Unknown currency code.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Unknown cart table column.
    #[error("Unknown sort column: {0} (expected product, price, quantity or total)")]
    UnknownSortColumn(String),

    /// Unknown sort direction.
    #[error("Unknown sort direction: {0} (expected asc, desc or none)")]
    UnknownSortDirection(String),

    /// Page numbers start at 1.
    #[error("Invalid page: {0}")]
    InvalidPage(u32),

    /// Page size must be positive.
    #[error("Invalid page size: {0}")]
    InvalidPageSize(u32),
}
