use tracing::{error, info, instrument, warn};

use super::CartClient;
use crate::domain::{CheckoutRequest, OrderReview};
use crate::error::CheckoutError;

/// Reads the final cart for confirmation and empties it once the order is final.
#[derive(Clone)]
pub struct CheckoutClient {
    cart: CartClient,
}

impl CheckoutClient {
    pub fn new(cart: CartClient) -> Self {
        Self { cart }
    }

    /// Builds the order summary without touching the cart.
    #[instrument(skip(self, request), fields(payment_method = ?request.payment_method))]
    pub async fn review(&self, request: CheckoutRequest) -> Result<OrderReview, CheckoutError> {
        if let Some(field) = request.customer.missing_field() {
            error!(field, "Validation failed: missing customer field");
            return Err(CheckoutError::MissingCustomerField(field));
        }

        let snapshot = self.cart.snapshot().await?;
        if snapshot.is_empty() {
            warn!("Reviewing an empty cart");
        }
        Ok(OrderReview::new(request, snapshot))
    }

    /// Reviews the order, then clears the cart. The review is the receipt.
    #[instrument(skip(self, request), fields(payment_method = ?request.payment_method))]
    pub async fn confirm(&self, request: CheckoutRequest) -> Result<OrderReview, CheckoutError> {
        let receipt = self.review(request).await?;
        self.cart.clear().await?;
        info!(
            total = receipt.total,
            lines = receipt.items.len(),
            change_due = ?receipt.change_due,
            "Order confirmed; cart cleared"
        );
        Ok(receipt)
    }
}
