use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

use super::{CartClient, CatalogClient};
use crate::domain::{CartSnapshot, Product};
use crate::error::OrderEntryError;

/// A removal waiting out its delay before it reaches the cart.
#[derive(Debug)]
pub struct PendingRemoval {
    handle: JoinHandle<Result<CartSnapshot, OrderEntryError>>,
}

impl PendingRemoval {
    /// Waits for the removal to be applied and returns the resulting snapshot.
    pub async fn wait(self) -> Result<CartSnapshot, OrderEntryError> {
        self.handle
            .await
            .map_err(|e| OrderEntryError::TaskFailed(e.to_string()))?
    }
}

/// Result of a quantity edit from the order-entry table.
#[derive(Debug)]
pub enum QuantityEdit {
    Applied(CartSnapshot),
    RemovalScheduled(PendingRemoval),
}

type RemovalResult = Result<CartSnapshot, OrderEntryError>;

/// A removal still inside its delay. Whoever takes it out of the map sends the
/// RemoveItem; if that is not the timer task, the result is handed to it
/// through `applied`.
struct PendingEntry {
    seq: u64,
    applied: oneshot::Sender<RemovalResult>,
}

#[derive(Default)]
struct PendingRemovals {
    next_seq: AtomicU64,
    entries: Mutex<HashMap<String, PendingEntry>>,
}

impl PendingRemovals {
    fn insert(&self, id: String, applied: oneshot::Sender<RemovalResult>) -> u64 {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.lock().insert(id, PendingEntry { seq, applied });
        seq
    }

    fn take(&self, id: &str) -> Option<PendingEntry> {
        self.lock().remove(id)
    }

    /// Removes the entry only if it is still the one registered as `seq`.
    fn claim(&self, id: &str, seq: u64) -> bool {
        let mut entries = self.lock();
        match entries.get(id) {
            Some(entry) if entry.seq == seq => {
                entries.remove(id);
                true
            }
            _ => false,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, PendingEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Translates order-entry screen events into catalog lookups and cart
/// operations.
///
/// A later edit or selection for an id with a removal still in its delay
/// applies that removal first, so the cart sees the requests in the order the
/// screen issued them.
#[derive(Clone)]
pub struct OrderEntryClient {
    cart: CartClient,
    catalog: CatalogClient,
    removal_delay: Duration,
    pending: Arc<PendingRemovals>,
}

impl OrderEntryClient {
    pub fn new(cart: CartClient, catalog: CatalogClient, removal_delay: Duration) -> Self {
        Self {
            cart,
            catalog,
            removal_delay,
            pending: Arc::new(PendingRemovals::default()),
        }
    }

    /// Products to offer in the product selector.
    #[instrument(skip(self))]
    pub async fn available_products(&self) -> Result<Vec<Product>, OrderEntryError> {
        debug!("Listing catalog products");
        Ok(self.catalog.list_products().await?)
    }

    /// Looks the product up in the catalog and adds one unit of it to the cart.
    #[instrument(skip(self))]
    pub async fn select_product(&self, product_id: String) -> Result<CartSnapshot, OrderEntryError> {
        let product = match self.catalog.get_product(product_id.clone()).await {
            Ok(Some(product)) => product,
            Ok(None) => {
                error!("Product not found in catalog");
                return Err(OrderEntryError::UnknownProduct(product_id));
            }
            Err(e) => {
                error!(error = %e, "Catalog lookup failed");
                return Err(e.into());
            }
        };

        self.flush_removal(&product_id).await?;
        info!(product_name = %product.name, price = product.price, "Adding product to cart");
        Ok(self.cart.add_item(product).await?)
    }

    /// Quantities below 1 go through the delayed removal path.
    #[instrument(skip(self))]
    pub async fn edit_quantity(&self, id: String, quantity: i64) -> Result<QuantityEdit, OrderEntryError> {
        if quantity < 1 {
            return Ok(QuantityEdit::RemovalScheduled(self.schedule_removal(id).await?));
        }
        self.flush_removal(&id).await?;
        Ok(QuantityEdit::Applied(self.cart.set_quantity(id, quantity).await?))
    }

    /// Negative prices never reach the cart; the current snapshot is returned instead.
    #[instrument(skip(self))]
    pub async fn edit_price(&self, id: String, price: f64) -> Result<CartSnapshot, OrderEntryError> {
        self.flush_removal(&id).await?;
        if price < 0.0 {
            debug!("Ignoring negative price edit");
            return Ok(self.cart.snapshot().await?);
        }
        Ok(self.cart.set_price(id, price).await?)
    }

    /// Removes `id` after the configured delay, leaving the screen time to
    /// animate the row out. The cart sees an ordinary removal once the delay
    /// has passed, or earlier if another request for `id` comes in first.
    #[instrument(skip(self))]
    pub async fn schedule_removal(&self, id: String) -> Result<PendingRemoval, OrderEntryError> {
        self.flush_removal(&id).await?;

        let delay = self.removal_delay;
        debug!(?delay, "Scheduling removal");

        let (applied_tx, mut applied_rx) = oneshot::channel();
        let seq = self.pending.insert(id.clone(), applied_tx);
        let cart = self.cart.clone();
        let pending = Arc::clone(&self.pending);

        let handle = tokio::spawn(async move {
            tokio::select! {
                applied = &mut applied_rx => applied
                    .map_err(|e| OrderEntryError::TaskFailed(e.to_string()))
                    .and_then(|result| result),
                _ = tokio::time::sleep(delay) => {
                    if pending.claim(&id, seq) {
                        cart.remove_item(id).await.map_err(OrderEntryError::from)
                    } else {
                        applied_rx
                            .await
                            .map_err(|e| OrderEntryError::TaskFailed(e.to_string()))
                            .and_then(|result| result)
                    }
                }
            }
        });
        Ok(PendingRemoval { handle })
    }

    /// Sends the pending removal for `id` right away, if there is one.
    async fn flush_removal(&self, id: &str) -> Result<(), OrderEntryError> {
        let Some(entry) = self.pending.take(id) else {
            return Ok(());
        };
        debug!(product_id = %id, "Applying pending removal early");
        let result = self
            .cart
            .remove_item(id.to_string())
            .await
            .map_err(OrderEntryError::from);
        let _ = entry.applied.send(result.clone());
        result.map(|_| ())
    }
}
