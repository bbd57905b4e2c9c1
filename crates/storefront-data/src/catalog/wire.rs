//! Catalog service payloads.
//!
//! The catalog speaks the dummyjson product format. Prices arrive as decimal
//! numbers and ids as integers; both are normalized here.

use serde::{Deserialize, Deserializer};
use storefront_commerce::prelude::*;

use crate::FetchError;

/// A product as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct WireProduct {
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub id: String,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub description: String,
}

impl WireProduct {
    /// Convert into the domain type, pricing in `currency`.
    ///
    /// A negative or non-finite price is a malformed payload.
    pub fn into_product(self, currency: Currency) -> Result<Product, FetchError> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(FetchError::ParseError(format!(
                "product {} has invalid price {}",
                self.id, self.price
            )));
        }
        Ok(Product::new(
            self.id,
            self.title,
            Money::from_decimal(self.price, currency),
            self.stock,
        )
        .with_thumbnail(self.thumbnail)
        .with_description(self.description))
    }
}

/// A listing page as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct WireProductList {
    pub products: Vec<WireProduct>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u32,
}

impl WireProductList {
    pub fn into_page(self, currency: Currency) -> Result<ProductPage, FetchError> {
        Ok(ProductPage {
            products: self
                .products
                .into_iter()
                .map(|p| p.into_product(currency))
                .collect::<Result<_, _>>()?,
            total: self.total,
            skip: self.skip,
            limit: self.limit,
        })
    }
}

fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST: &str = r#"{
        "products": [
            {
                "id": 1,
                "title": "Essence Mascara Lash Princess",
                "description": "Popular mascara",
                "price": 9.99,
                "stock": 5,
                "thumbnail": "https://cdn.dummyjson.com/1/thumbnail.png",
                "rating": 4.94
            },
            {
                "id": "sku-2",
                "title": "Eyeshadow Palette",
                "price": 19.99,
                "stock": -3
            }
        ],
        "total": 194,
        "skip": 0,
        "limit": 2
    }"#;

    #[test]
    fn test_list_payload_converts_to_page() {
        let wire: WireProductList = serde_json::from_str(LIST).unwrap();
        let page = wire.into_page(Currency::USD).unwrap();

        assert_eq!(page.total, 194);
        assert_eq!(page.limit, 2);
        assert_eq!(page.len(), 2);

        let first = &page.products[0];
        assert_eq!(first.id, ProductId::from(1u64));
        assert_eq!(first.price, Money::new(999, Currency::USD));
        assert_eq!(first.stock, 5);
        assert_eq!(first.description, "Popular mascara");
    }

    #[test]
    fn test_string_ids_and_negative_stock() {
        let wire: WireProductList = serde_json::from_str(LIST).unwrap();
        let second = wire.into_page(Currency::EUR).unwrap().products.remove(1);

        assert_eq!(second.id.as_str(), "sku-2");
        assert_eq!(second.stock, 0);
        assert_eq!(second.price, Money::new(1999, Currency::EUR));
        assert!(second.thumbnail.is_empty());
    }

    #[test]
    fn test_missing_price_is_rejected() {
        let result = serde_json::from_str::<WireProduct>(r#"{"id": 1, "title": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let wire: WireProduct =
            serde_json::from_str(r#"{"id": 7, "title": "Refund", "price": -5.0, "stock": 3}"#).unwrap();
        let err = wire.into_product(Currency::USD).unwrap_err();
        assert!(matches!(err, FetchError::ParseError(_)));

        let list: WireProductList = serde_json::from_str(
            r#"{"products": [{"id": 1, "title": "ok", "price": 1.0}, {"id": 2, "title": "bad", "price": -0.01}]}"#,
        )
        .unwrap();
        assert!(matches!(list.into_page(Currency::USD), Err(FetchError::ParseError(_))));
    }
}
