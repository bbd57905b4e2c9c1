//! Product catalog module.
//!
//! Contains product records, listing pages and product list paging state.

mod listing;
mod product;

pub use listing::{ListingState, DEFAULT_PAGE_SIZE};
pub use product::{Product, ProductPage};
