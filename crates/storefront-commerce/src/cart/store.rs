//! The cart store.
//!
//! [`CartStore`] owns the current [`CartSnapshot`] and replaces it wholesale
//! on every applied mutation. Observers registered with
//! [`CartStore::subscribe`] or [`CartStore::watch`] receive the current
//! snapshot immediately and then every published snapshot, in operation
//! order.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use crate::cart::{CartLineItem, CartSnapshot};
use crate::catalog::Product;
use crate::error::CartError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&CartSnapshot) + Send>;

enum Observer {
    Callback(SubscriptionId, Callback),
    Channel(UnboundedSender<CartSnapshot>),
}

/// Authoritative in-memory cart.
///
/// Mutations take `&mut self`; the store has exactly one writer. Rejected
/// operations leave the snapshot untouched and notify nobody.
pub struct CartStore {
    snapshot: CartSnapshot,
    observers: Vec<Observer>,
    next_subscription: u64,
}

impl CartStore {
    /// An empty cart priced in US dollars.
    pub fn new() -> Self {
        Self::with_currency(Currency::USD)
    }

    /// An empty cart priced in `currency`.
    pub fn with_currency(currency: Currency) -> Self {
        Self {
            snapshot: CartSnapshot::empty(currency),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Add one unit of `product`.
    ///
    /// A product not yet in the cart gets a new line with quantity 1 at the
    /// end. An existing line is incremented in place if its quantity is below
    /// the product's current stock.
    pub fn add_to_cart(&mut self, product: &Product) -> Result<(), CartError> {
        if product.price.currency != self.snapshot.currency() {
            return Err(reject(CartError::CurrencyMismatch {
                expected: self.snapshot.currency(),
                got: product.price.currency,
            }));
        }

        let mut items = self.snapshot.to_vec();
        match self.snapshot.position(&product.id) {
            Some(index) => {
                let existing = &items[index];
                if existing.quantity >= product.stock {
                    return Err(reject(CartError::StockLimitReached {
                        id: product.id.clone(),
                        title: product.title.clone(),
                        stock: product.stock,
                    }));
                }
                items[index] = existing.with_quantity(existing.quantity + 1);
            }
            None => {
                if product.stock < 1 {
                    return Err(reject(CartError::StockLimitReached {
                        id: product.id.clone(),
                        title: product.title.clone(),
                        stock: product.stock,
                    }));
                }
                items.push(CartLineItem::from_product(product));
            }
        }

        debug!(product_id = %product.id, "added to cart");
        self.publish(items);
        Ok(())
    }

    /// Set the quantity of an existing line, keeping its position.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) -> Result<(), CartError> {
        if quantity < 1 {
            return Err(reject(CartError::InvalidQuantity(quantity)));
        }

        let index = self
            .snapshot
            .position(id)
            .ok_or_else(|| reject(CartError::ItemNotInCart(id.clone())))?;

        let mut items = self.snapshot.to_vec();
        let item = &items[index];
        if quantity > item.stock {
            return Err(reject(CartError::ExceedsStock {
                id: id.clone(),
                requested: quantity,
                stock: item.stock,
            }));
        }

        items[index] = item.with_quantity(quantity);
        debug!(product_id = %id, quantity, "updated cart quantity");
        self.publish(items);
        Ok(())
    }

    /// Remove the line for `id`.
    ///
    /// Returns false, and publishes nothing, if there was no such line.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        if self.snapshot.position(id).is_none() {
            return false;
        }

        let items: Vec<CartLineItem> = self
            .snapshot
            .items()
            .iter()
            .filter(|i| &i.id != id)
            .cloned()
            .collect();

        debug!(product_id = %id, "removed from cart");
        self.publish(items);
        true
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        debug!("cleared cart");
        self.publish(Vec::new());
    }

    /// Sum of `price * quantity`; zero when empty.
    pub fn total(&self) -> Money {
        self.snapshot.total()
    }

    /// Copy of the current line items. Changing it does not affect the store.
    pub fn cart_items(&self) -> Vec<CartLineItem> {
        self.snapshot.to_vec()
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> &CartSnapshot {
        &self.snapshot
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> i64 {
        self.snapshot.item_count()
    }

    pub fn unique_item_count(&self) -> usize {
        self.snapshot.unique_item_count()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    pub fn get_item(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.snapshot.get(id)
    }

    pub fn currency(&self) -> Currency {
        self.snapshot.currency()
    }

    /// Register a callback.
    ///
    /// It runs right away with the current snapshot, then after every applied
    /// mutation until [`CartStore::unsubscribe`] is called.
    pub fn subscribe<F>(&mut self, mut observer: F) -> SubscriptionId
    where
        F: FnMut(&CartSnapshot) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;

        observer(&self.snapshot);
        self.observers.push(Observer::Callback(id, Box::new(observer)));
        id
    }

    /// Drop a callback. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers
            .retain(|o| !matches!(o, Observer::Callback(sub, _) if *sub == id));
        self.observers.len() < before
    }

    /// Open a channel of snapshots.
    ///
    /// The receiver already holds the current snapshot. It sees every later
    /// snapshot, and closes only when the store is dropped.
    pub fn watch(&mut self) -> CartReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        // The receiver is alive, so the initial send cannot fail.
        let _ = tx.send(self.snapshot.clone());
        self.observers.push(Observer::Channel(tx));
        CartReceiver { rx }
    }

    /// Number of live observers.
    pub fn observer_count(&self) -> usize {
        self.observers
            .iter()
            .filter(|o| match o {
                Observer::Callback(..) => true,
                Observer::Channel(tx) => !tx.is_closed(),
            })
            .count()
    }

    fn publish(&mut self, items: Vec<CartLineItem>) {
        self.snapshot = self.snapshot.next(items);
        let snapshot = &self.snapshot;

        // Channels whose receiver went away are pruned here.
        self.observers.retain_mut(|observer| match observer {
            Observer::Callback(_, callback) => {
                callback(snapshot);
                true
            }
            Observer::Channel(tx) => tx.send(snapshot.clone()).is_ok(),
        });
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("snapshot", &self.snapshot)
            .field("observers", &self.observers.len())
            .finish()
    }
}

fn reject(err: CartError) -> CartError {
    warn!(error = %err, "cart operation rejected");
    err
}

/// Receiving side of [`CartStore::watch`].
#[derive(Debug)]
pub struct CartReceiver {
    rx: UnboundedReceiver<CartSnapshot>,
}

impl CartReceiver {
    /// Wait for the next snapshot. `None` once the store is gone.
    pub async fn recv(&mut self) -> Option<CartSnapshot> {
        self.rx.recv().await
    }

    /// Take the next pending snapshot without waiting.
    pub fn try_recv(&mut self) -> Option<CartSnapshot> {
        self.rx.try_recv().ok()
    }

    /// Take every pending snapshot, oldest first.
    pub fn drain(&mut self) -> Vec<CartSnapshot> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }

    /// Take every pending snapshot and keep only the newest.
    pub fn latest(mut self) -> Option<CartSnapshot> {
        self.drain().pop()
    }

    /// True once the store has been dropped and nothing is pending.
    pub fn is_closed(&self) -> bool {
        self.rx.is_closed() && self.rx.is_empty()
    }
}
