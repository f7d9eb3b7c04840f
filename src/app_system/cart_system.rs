use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{error, info};

use super::{AppConfig, SystemError};
use crate::actor_framework::ResourceActor;
use crate::cart_actor::CartService;
use crate::clients::{CartClient, CatalogClient, CheckoutClient, OrderEntryClient};
use crate::domain::Product;

/// Starts the catalog and cart actors, wires the clients together, and
/// handles shutdown.
pub struct CartSystem {
    pub catalog_client: CatalogClient,
    pub cart_client: CartClient,
    pub order_entry_client: OrderEntryClient,
    pub checkout_client: CheckoutClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CartSystem {
    /// Must be called from within a tokio runtime.
    pub fn new(config: &AppConfig) -> Self {
        info!(channel_buffer = config.channel_buffer, "Starting cart system");

        let product_id_counter = Arc::new(AtomicU64::new(1));
        let next_product_id = move || {
            let id = product_id_counter.fetch_add(1, Ordering::SeqCst);
            format!("product_{}", id)
        };
        let (catalog_actor, catalog_resource_client) =
            ResourceActor::<Product>::new(config.channel_buffer, next_product_id);
        let catalog_client = CatalogClient::new(catalog_resource_client);
        let catalog_handle = tokio::spawn(catalog_actor.run());

        let (cart_service, cart_client) = CartService::new(config.channel_buffer);
        let cart_handle = tokio::spawn(cart_service.run());

        let order_entry_client = OrderEntryClient::new(
            cart_client.clone(),
            catalog_client.clone(),
            config.removal_delay,
        );
        let checkout_client = CheckoutClient::new(cart_client.clone());

        Self {
            catalog_client,
            cart_client,
            order_entry_client,
            checkout_client,
            handles: vec![catalog_handle, cart_handle],
        }
    }

    /// Stops both actors and joins their tasks. Clones of the clients held
    /// elsewhere do not keep the actors alive.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");
        let mut result = Ok(());

        if let Err(e) = self.cart_client.shutdown().await {
            error!(error = %e, "Failed to stop cart actor");
            result = Err(SystemError::from(e));
        }
        if let Err(e) = self.catalog_client.shutdown().await {
            error!(error = %e, "Failed to stop catalog actor");
            if result.is_ok() {
                result = Err(SystemError::from(e));
            }
        }

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                if result.is_ok() {
                    result = Err(SystemError::TaskFailed(e.to_string()));
                }
            }
        }

        if result.is_ok() {
            info!("System shutdown complete.");
        }
        result
    }
}
