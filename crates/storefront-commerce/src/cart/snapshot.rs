//! Line items and immutable cart snapshots.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cart::{sort_line_items, CartSort};
use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// One product's entry in the cart.
///
/// Title, price, stock and thumbnail are copied from the product when the
/// line is created and are not refreshed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    /// Product id; unique within a cart.
    pub id: ProductId,
    /// Product title (denormalized for display).
    pub title: String,
    /// Unit price.
    pub price: Money,
    /// Quantity, always within `1..=stock`.
    pub quantity: i64,
    /// Stock at add-time.
    pub stock: i64,
    /// Thumbnail image URL.
    pub thumbnail: String,
}

impl CartLineItem {
    /// A fresh line for `product` holding a single unit.
    pub(crate) fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            price: product.price,
            quantity: 1,
            stock: product.stock,
            thumbnail: product.thumbnail.clone(),
        }
    }

    /// Copy of this line with another quantity.
    pub(crate) fn with_quantity(&self, quantity: i64) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }

    /// `price * quantity`.
    pub fn line_total(&self) -> Money {
        self.price.multiply(self.quantity)
    }
}

/// The full state of the cart at one point in time.
///
/// Cloning is cheap and shares the line items; a snapshot is never modified
/// once published.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSnapshot {
    items: Arc<[CartLineItem]>,
    currency: Currency,
    revision: u64,
}

impl CartSnapshot {
    /// An empty cart priced in `currency`.
    pub fn empty(currency: Currency) -> Self {
        Self {
            items: Arc::from(Vec::new()),
            currency,
            revision: 0,
        }
    }

    /// Successor snapshot holding `items`.
    pub(crate) fn next(&self, items: Vec<CartLineItem>) -> Self {
        Self {
            items: Arc::from(items),
            currency: self.currency,
            revision: self.revision + 1,
        }
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Owned copy of the line items.
    pub fn to_vec(&self) -> Vec<CartLineItem> {
        self.items.to_vec()
    }

    /// Cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Number of applied mutations that led to this snapshot.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Sum of `price * quantity` over all lines.
    pub fn total(&self) -> Money {
        let cents = self
            .items
            .iter()
            .fold(0_i64, |acc, item| acc.saturating_add(item.line_total().amount_cents));
        Money::new(cents, self.currency)
    }

    /// Sum of quantities (the cart badge).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct products.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a line by product id.
    pub fn get(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    pub(crate) fn position(&self, id: &ProductId) -> Option<usize> {
        self.items.iter().position(|i| &i.id == id)
    }

    /// Line items ordered for the cart table.
    pub fn sorted(&self, sort: CartSort) -> Vec<CartLineItem> {
        sort_line_items(&self.items, sort)
    }

    /// Check whether two snapshots share the same backing items.
    pub fn shares_items_with(&self, other: &CartSnapshot) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }
}

impl Serialize for CartSnapshot {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("CartSnapshot", 4)?;
        state.serialize_field("items", &*self.items)?;
        state.serialize_field("item_count", &self.item_count())?;
        state.serialize_field("total", &self.total())?;
        state.serialize_field("revision", &self.revision)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, price_cents: i64, quantity: i64) -> CartLineItem {
        CartLineItem {
            id: ProductId::new(id),
            title: format!("Product {}", id),
            price: Money::new(price_cents, Currency::USD),
            quantity,
            stock: 10,
            thumbnail: String::new(),
        }
    }

    #[test]
    fn test_empty_snapshot_totals_zero() {
        let snapshot = CartSnapshot::empty(Currency::USD);
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.total(), Money::zero(Currency::USD));
        assert_eq!(snapshot.item_count(), 0);
    }

    #[test]
    fn test_total_and_count() {
        let snapshot =
            CartSnapshot::empty(Currency::USD).next(vec![line("a", 500, 2), line("b", 300, 10)]);

        assert_eq!(snapshot.total().amount_cents, 4000);
        assert_eq!(snapshot.item_count(), 12);
        assert_eq!(snapshot.unique_item_count(), 2);
        assert_eq!(snapshot.revision(), 1);
    }

    #[test]
    fn test_to_vec_is_detached() {
        let snapshot = CartSnapshot::empty(Currency::USD).next(vec![line("a", 500, 2)]);
        let mut copy = snapshot.to_vec();
        copy[0].quantity = 99;
        copy.clear();

        assert_eq!(snapshot.items()[0].quantity, 2);
        assert_eq!(snapshot.unique_item_count(), 1);
    }

    #[test]
    fn test_line_total() {
        let item = line("a", 100, 7);
        assert_eq!(item.line_total().amount_cents, 700);
    }

    #[test]
    fn test_snapshot_serializes_summary() {
        let snapshot = CartSnapshot::empty(Currency::USD).next(vec![line("a", 250, 2)]);
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["item_count"], 2);
        assert_eq!(json["total"]["amount_cents"], 500);
        assert_eq!(json["items"][0]["id"], "a");
    }
}
