//! Cart table ordering.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cart::CartLineItem;
use crate::error::CommerceError;

/// Sortable cart table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    /// Product title, lexicographic.
    Product,
    /// Unit price.
    Price,
    Quantity,
    /// Line total (`price * quantity`).
    Total,
}

impl SortColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::Product => "product",
            SortColumn::Price => "price",
            SortColumn::Quantity => "quantity",
            SortColumn::Total => "total",
        }
    }

    fn compare(&self, a: &CartLineItem, b: &CartLineItem) -> Ordering {
        match self {
            SortColumn::Product => a.title.cmp(&b.title),
            SortColumn::Price => a.price.amount_cents.cmp(&b.price.amount_cents),
            SortColumn::Quantity => a.quantity.cmp(&b.quantity),
            SortColumn::Total => a
                .line_total()
                .amount_cents
                .cmp(&b.line_total().amount_cents),
        }
    }
}

impl FromStr for SortColumn {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "product" => Ok(SortColumn::Product),
            "price" => Ok(SortColumn::Price),
            "quantity" => Ok(SortColumn::Quantity),
            "total" => Ok(SortColumn::Total),
            _ => Err(CommerceError::UnknownSortColumn(s.to_string())),
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction. `None` keeps insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
    #[default]
    None,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
            SortDirection::None => "none",
        }
    }
}

impl FromStr for SortDirection {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            "none" | "" => Ok(SortDirection::None),
            _ => Err(CommerceError::UnknownSortDirection(s.to_string())),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sort request for the cart table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSort {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl CartSort {
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// Insertion order.
    pub fn unsorted() -> Self {
        Self::new(SortColumn::Product, SortDirection::None)
    }

    pub fn asc(column: SortColumn) -> Self {
        Self::new(column, SortDirection::Asc)
    }

    pub fn desc(column: SortColumn) -> Self {
        Self::new(column, SortDirection::Desc)
    }

    /// The sort after clicking `column`'s header.
    ///
    /// Repeated clicks on one column go asc, desc, then back to unsorted.
    /// Clicking another column starts over at asc.
    pub fn cycle(self, column: SortColumn) -> Self {
        if self.column != column || self.direction == SortDirection::None {
            return Self::asc(column);
        }
        match self.direction {
            SortDirection::Asc => Self::desc(column),
            _ => Self::new(column, SortDirection::None),
        }
    }

    pub fn is_sorted(&self) -> bool {
        self.direction != SortDirection::None
    }
}

impl Default for CartSort {
    fn default() -> Self {
        Self::unsorted()
    }
}

/// Order `items` for display.
///
/// The sort is stable, so equal keys keep their insertion order. The input
/// slice is never reordered.
pub fn sort_line_items(items: &[CartLineItem], sort: CartSort) -> Vec<CartLineItem> {
    let mut sorted = items.to_vec();
    match sort.direction {
        SortDirection::None => {}
        SortDirection::Asc => sorted.sort_by(|a, b| sort.column.compare(a, b)),
        SortDirection::Desc => sorted.sort_by(|a, b| sort.column.compare(b, a)),
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use crate::money::{Currency, Money};

    fn line(id: &str, title: &str, price_cents: i64, quantity: i64) -> CartLineItem {
        CartLineItem {
            id: ProductId::new(id),
            title: title.to_string(),
            price: Money::new(price_cents, Currency::USD),
            quantity,
            stock: 100,
            thumbnail: String::new(),
        }
    }

    fn ids(items: &[CartLineItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    fn sample() -> Vec<CartLineItem> {
        vec![
            line("1", "Mascara", 999, 3),
            line("2", "Apple", 150, 10),
            line("3", "Lipstick", 1299, 1),
        ]
    }

    #[test]
    fn test_sort_by_total_desc() {
        let items = vec![line("a", "A", 500, 2), line("b", "B", 300, 10)];
        let sorted = sort_line_items(&items, CartSort::desc(SortColumn::Total));

        let totals: Vec<i64> = sorted.iter().map(|i| i.line_total().amount_cents).collect();
        assert_eq!(totals, vec![3000, 1000]);
    }

    #[test]
    fn test_sort_by_title() {
        let sorted = sort_line_items(&sample(), CartSort::asc(SortColumn::Product));
        assert_eq!(ids(&sorted), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_sort_by_price_and_quantity() {
        let by_price = sort_line_items(&sample(), CartSort::desc(SortColumn::Price));
        assert_eq!(ids(&by_price), vec!["3", "1", "2"]);

        let by_quantity = sort_line_items(&sample(), CartSort::asc(SortColumn::Quantity));
        assert_eq!(ids(&by_quantity), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_none_direction_keeps_insertion_order() {
        let items = sample();
        let sorted = sort_line_items(&items, CartSort::new(SortColumn::Price, SortDirection::None));
        assert_eq!(sorted, items);
    }

    #[test]
    fn test_equal_keys_keep_insertion_order() {
        let items = vec![
            line("x", "Same", 100, 1),
            line("y", "Same", 100, 1),
            line("z", "Same", 100, 1),
        ];
        let asc = sort_line_items(&items, CartSort::asc(SortColumn::Price));
        let desc = sort_line_items(&items, CartSort::desc(SortColumn::Price));
        assert_eq!(ids(&asc), vec!["x", "y", "z"]);
        assert_eq!(ids(&desc), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_header_clicks_cycle_direction() {
        let sort = CartSort::default().cycle(SortColumn::Price);
        assert_eq!(sort, CartSort::asc(SortColumn::Price));

        let sort = sort.cycle(SortColumn::Price);
        assert_eq!(sort, CartSort::desc(SortColumn::Price));

        let sort = sort.cycle(SortColumn::Price);
        assert!(!sort.is_sorted());

        let sort = CartSort::desc(SortColumn::Price).cycle(SortColumn::Total);
        assert_eq!(sort, CartSort::asc(SortColumn::Total));
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!("Total".parse::<SortColumn>(), Ok(SortColumn::Total));
        assert_eq!("".parse::<SortDirection>(), Ok(SortDirection::None));
        assert_eq!("desc".parse::<SortDirection>(), Ok(SortDirection::Desc));
        assert!("actions".parse::<SortColumn>().is_err());
        assert!("sideways".parse::<SortDirection>().is_err());
    }
}
