use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::cart_actor::{CartError, CartRequest};
use crate::domain::{CartSnapshot, Product};

/// Handle to the [`CartService`](crate::cart_actor::CartService). Cheap to
/// clone; every clone feeds the same mailbox.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }

    /// Fire-and-forget stop request; the actor finishes queued requests first.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CartError> {
        debug!("Sending shutdown request");
        self.sender
            .send(CartRequest::Shutdown)
            .await
            .map_err(|e| CartError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(CartClient => fn add_item(product: Product) -> CartSnapshot as CartRequest::AddItem, Error = CartError);
client_method!(CartClient => fn set_quantity(id: String, quantity: i64) -> CartSnapshot as CartRequest::SetQuantity, Error = CartError);
client_method!(CartClient => fn set_price(id: String, price: f64) -> CartSnapshot as CartRequest::SetPrice, Error = CartError);
client_method!(CartClient => fn remove_item(id: String) -> CartSnapshot as CartRequest::RemoveItem, Error = CartError);
client_method!(CartClient => fn clear() -> CartSnapshot as CartRequest::Clear, Error = CartError);
client_method!(CartClient => fn snapshot() -> CartSnapshot as CartRequest::Snapshot, Error = CartError);
