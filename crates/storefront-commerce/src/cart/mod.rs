//! Shopping cart module.
//!
//! Contains the cart store, its immutable snapshots and the cart table sort.

mod snapshot;
mod sort;
mod store;

pub use snapshot::{CartLineItem, CartSnapshot};
pub use sort::{sort_line_items, CartSort, SortColumn, SortDirection};
pub use store::{CartReceiver, CartStore, SubscriptionId};
