//! Interactive browsing state.
//!
//! A [`Session`] ties a catalog source to one cart and the product list's
//! paging. It is what the `browse` screens read from and write to.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use storefront_commerce::prelude::*;
use storefront_data::{CatalogSource, FetchError};

pub struct Session {
    catalog: Arc<dyn CatalogSource>,
    cart: CartStore,
    listing: ListingState,
    page: ProductPage,
    sort: CartSort,
    badge: Arc<AtomicI64>,
}

impl Session {
    pub fn new(catalog: Arc<dyn CatalogSource>, currency: Currency, listing: ListingState) -> Self {
        let mut cart = CartStore::with_currency(currency);

        let badge = Arc::new(AtomicI64::new(0));
        let counter = Arc::clone(&badge);
        cart.subscribe(move |snapshot| counter.store(snapshot.item_count(), Ordering::Relaxed));

        Self {
            catalog,
            cart,
            listing,
            page: ProductPage::default(),
            sort: CartSort::default(),
            badge,
        }
    }

    /// Fetch the current listing page.
    pub async fn load_page(&mut self) -> Result<&ProductPage, FetchError> {
        let page = self
            .catalog
            .list_products(self.listing.page(), self.listing.page_size())
            .await?;
        self.listing.record(&page);
        self.page = page;
        Ok(&self.page)
    }

    /// Move to the next page. Returns false when already on the last one.
    ///
    /// A failed fetch leaves the session on the page it was on.
    pub async fn next_page(&mut self) -> Result<bool, FetchError> {
        if !self.listing.next_page() {
            return Ok(false);
        }
        if let Err(e) = self.load_page().await {
            self.listing.prev_page();
            return Err(e);
        }
        Ok(true)
    }

    /// Move to the previous page. Returns false when already on the first one.
    pub async fn prev_page(&mut self) -> Result<bool, FetchError> {
        if !self.listing.prev_page() {
            return Ok(false);
        }
        if let Err(e) = self.load_page().await {
            self.listing.next_page();
            return Err(e);
        }
        Ok(true)
    }

    /// Change the page size and reload from page 1.
    ///
    /// A failed fetch restores the previous page and size.
    pub async fn set_page_size(&mut self, page_size: u32) -> anyhow::Result<()> {
        let previous = self.listing;
        self.listing.set_page_size(page_size)?;
        if let Err(e) = self.load_page().await {
            self.listing = previous;
            return Err(e.into());
        }
        Ok(())
    }

    /// Fetch full product details.
    pub async fn product(&self, id: &ProductId) -> Result<Product, FetchError> {
        self.catalog.get_product(id).await
    }

    pub fn add_to_cart(&mut self, product: &Product) -> Result<(), CartError> {
        self.cart.add_to_cart(product)
    }

    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) -> Result<(), CartError> {
        self.cart.update_quantity(id, quantity)
    }

    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        self.cart.remove_item(id)
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear_cart();
    }

    /// Apply a header click on the cart table.
    pub fn sort_by(&mut self, column: SortColumn) -> CartSort {
        self.sort = self.sort.cycle(column);
        self.sort
    }

    /// Cart lines in the current table order.
    pub fn cart_rows(&self) -> Vec<CartLineItem> {
        self.cart.snapshot().sorted(self.sort)
    }

    /// Total units in the cart, as last published to the badge.
    pub fn badge(&self) -> i64 {
        self.badge.load(Ordering::Relaxed)
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn listing(&self) -> &ListingState {
        &self.listing
    }

    pub fn page(&self) -> &ProductPage {
        &self.page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicBool;
    use storefront_data::StaticCatalog;

    fn catalog(products: u64) -> StaticCatalog {
        StaticCatalog::new(
            (1..=products)
                .map(|i| Product::new(i, format!("Item {}", i), Money::new(250 * i as i64, Currency::USD), 2))
                .collect(),
        )
    }

    fn session(products: u64, page_size: u32) -> Session {
        Session::new(
            Arc::new(catalog(products)),
            Currency::USD,
            ListingState::new(page_size).unwrap(),
        )
    }

    /// Serves from a static catalog until switched offline.
    struct FlakyCatalog {
        inner: StaticCatalog,
        offline: AtomicBool,
    }

    #[async_trait]
    impl CatalogSource for FlakyCatalog {
        async fn list_products(&self, page: u32, page_size: u32) -> Result<ProductPage, FetchError> {
            if self.offline.load(Ordering::Relaxed) {
                return Err(FetchError::Timeout);
            }
            self.inner.list_products(page, page_size).await
        }

        async fn get_product(&self, id: &ProductId) -> Result<Product, FetchError> {
            if self.offline.load(Ordering::Relaxed) {
                return Err(FetchError::Timeout);
            }
            self.inner.get_product(id).await
        }
    }

    #[tokio::test]
    async fn test_paging_stops_at_both_ends() {
        let mut s = session(25, 12);
        s.load_page().await.unwrap();
        assert_eq!(s.listing().total_pages(), 3);
        assert!(!s.prev_page().await.unwrap());

        assert!(s.next_page().await.unwrap());
        assert!(s.next_page().await.unwrap());
        assert_eq!(s.page().len(), 1);
        assert!(!s.next_page().await.unwrap());
        assert_eq!(s.listing().page(), 3);
    }

    #[tokio::test]
    async fn test_page_size_change_returns_to_first_page() {
        let mut s = session(25, 12);
        s.load_page().await.unwrap();
        s.next_page().await.unwrap();

        s.set_page_size(5).await.unwrap();
        assert_eq!(s.listing().page(), 1);
        assert_eq!(s.page().len(), 5);
        assert!(s.set_page_size(0).await.is_err());
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_listing() {
        let flaky = Arc::new(FlakyCatalog {
            inner: catalog(25),
            offline: AtomicBool::new(false),
        });
        let mut s = Session::new(flaky.clone(), Currency::USD, ListingState::new(12).unwrap());
        s.load_page().await.unwrap();
        assert!(s.next_page().await.unwrap());
        let shown = s.page().clone();

        flaky.offline.store(true, Ordering::Relaxed);
        let err = s.set_page_size(5).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<FetchError>(), Some(FetchError::Timeout)));
        assert_eq!(s.listing().page(), 2);
        assert_eq!(s.listing().page_size(), 12);
        assert_eq!(s.page(), &shown);

        assert!(s.next_page().await.is_err());
        assert_eq!(s.listing().page(), 2);
        assert!(s.prev_page().await.is_err());
        assert_eq!(s.listing().page(), 2);

        flaky.offline.store(false, Ordering::Relaxed);
        s.set_page_size(5).await.unwrap();
        assert_eq!(s.listing().page(), 1);
        assert_eq!(s.page().len(), 5);
    }

    #[tokio::test]
    async fn test_badge_tracks_cart_quantity() {
        let mut s = session(3, 12);
        assert_eq!(s.badge(), 0);

        let p1 = s.product(&ProductId::from(1u64)).await.unwrap();
        let p2 = s.product(&ProductId::from(2u64)).await.unwrap();
        s.add_to_cart(&p1).unwrap();
        s.add_to_cart(&p1).unwrap();
        s.add_to_cart(&p2).unwrap();
        assert_eq!(s.badge(), 3);

        assert!(s.add_to_cart(&p1).is_err());
        assert_eq!(s.badge(), 3);

        s.update_quantity(&p1.id, 1).unwrap();
        assert_eq!(s.badge(), 2);

        assert!(s.remove_item(&p2.id));
        assert_eq!(s.badge(), 1);

        s.clear_cart();
        assert_eq!(s.badge(), 0);
    }

    #[tokio::test]
    async fn test_cart_rows_follow_header_clicks() {
        let mut s = session(3, 12);
        for id in [1u64, 3, 2] {
            let product = s.product(&ProductId::from(id)).await.unwrap();
            s.add_to_cart(&product).unwrap();
        }

        let ids = |s: &Session| -> Vec<String> {
            s.cart_rows().iter().map(|i| i.id.to_string()).collect()
        };

        assert_eq!(ids(&s), vec!["1", "3", "2"]);
        s.sort_by(SortColumn::Price);
        assert_eq!(ids(&s), vec!["1", "2", "3"]);
        s.sort_by(SortColumn::Price);
        assert_eq!(ids(&s), vec!["3", "2", "1"]);
        s.sort_by(SortColumn::Price);
        assert_eq!(ids(&s), vec!["1", "3", "2"]);
    }

    #[tokio::test]
    async fn test_bundled_fixture_browses() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/products.json");
        let catalog = StaticCatalog::from_file(path, Currency::USD).await.unwrap();
        let mut s = Session::new(Arc::new(catalog), Currency::USD, ListingState::new(2).unwrap());

        s.load_page().await.unwrap();
        assert_eq!(s.listing().total_pages(), 3);
        assert!(s.next_page().await.unwrap());
        assert!(s.next_page().await.unwrap());

        // The last product has no stock.
        let sold_out = s.page().products[0].clone();
        assert!(s.add_to_cart(&sold_out).is_err());
        assert_eq!(s.badge(), 0);
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let s = session(3, 12);
        let err = s.product(&ProductId::from(42u64)).await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound(_)));
    }
}
