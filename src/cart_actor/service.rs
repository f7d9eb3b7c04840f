use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use super::{CartError, CartRequest, ServiceResponse};
use crate::clients::CartClient;
use crate::domain::{CartSnapshot, CartState, Outcome, Product, SkipReason};

/// Owns the session cart and applies requests strictly one at a time, in the
/// order they arrive on the mailbox.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    cart: CartState,
}

impl CartService {
    pub fn new(buffer_size: usize) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            cart: CartState::new(),
        };
        let client = CartClient::new(sender);
        (service, client)
    }

    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!("CartService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::AddItem { product, respond_to } => {
                    self.handle_add_item(product, respond_to);
                }
                CartRequest::SetQuantity {
                    id,
                    quantity,
                    respond_to,
                } => {
                    self.handle_set_quantity(id, quantity, respond_to);
                }
                CartRequest::SetPrice {
                    id,
                    price,
                    respond_to,
                } => {
                    self.handle_set_price(id, price, respond_to);
                }
                CartRequest::RemoveItem { id, respond_to } => {
                    self.handle_remove_item(id, respond_to);
                }
                CartRequest::Clear { respond_to } => {
                    self.handle_clear(respond_to);
                }
                CartRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(self.cart.snapshot()));
                }
                CartRequest::Shutdown => {
                    info!("CartService shutting down");
                    break;
                }
            }
        }

        info!("CartService stopped");
    }

    fn reply(&self, outcome: Outcome, respond_to: ServiceResponse<CartSnapshot, CartError>) {
        match outcome {
            Outcome::Skipped(SkipReason::NotFound) => debug!("No line item with that id"),
            Outcome::Skipped(SkipReason::InvalidPrice) => warn!("Invalid price ignored"),
            outcome => info!(
                ?outcome,
                total = self.cart.total(),
                items = self.cart.items().len(),
                "Cart updated"
            ),
        }
        let _ = respond_to.send(Ok(self.cart.snapshot()));
    }

    #[instrument(fields(product_id = %product.id, price = product.price), skip(self, product, respond_to))]
    fn handle_add_item(
        &mut self,
        product: Product,
        respond_to: ServiceResponse<CartSnapshot, CartError>,
    ) {
        debug!("Processing add_item request");
        let outcome = self.cart.add_item(&product);
        self.reply(outcome, respond_to);
    }

    #[instrument(fields(product_id = %id), skip(self, id, respond_to))]
    fn handle_set_quantity(
        &mut self,
        id: String,
        quantity: i64,
        respond_to: ServiceResponse<CartSnapshot, CartError>,
    ) {
        debug!("Processing set_quantity request");
        let outcome = self.cart.set_quantity(&id, quantity);
        self.reply(outcome, respond_to);
    }

    #[instrument(fields(product_id = %id), skip(self, id, respond_to))]
    fn handle_set_price(
        &mut self,
        id: String,
        price: f64,
        respond_to: ServiceResponse<CartSnapshot, CartError>,
    ) {
        debug!("Processing set_price request");
        let outcome = self.cart.set_price(&id, price);
        self.reply(outcome, respond_to);
    }

    #[instrument(fields(product_id = %id), skip(self, id, respond_to))]
    fn handle_remove_item(
        &mut self,
        id: String,
        respond_to: ServiceResponse<CartSnapshot, CartError>,
    ) {
        debug!("Processing remove_item request");
        let outcome = self.cart.remove_item(&id);
        self.reply(outcome, respond_to);
    }

    #[instrument(skip(self, respond_to))]
    fn handle_clear(&mut self, respond_to: ServiceResponse<CartSnapshot, CartError>) {
        debug!("Processing clear request");
        let outcome = self.cart.clear();
        self.reply(outcome, respond_to);
    }
}
