use tokio::sync::oneshot;

use super::CartError;
use crate::domain::{CartSnapshot, Product};

pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Requests understood by [`CartService`](super::CartService). Every mutation
/// replies with the snapshot taken right after it was applied.
#[derive(Debug)]
pub enum CartRequest {
    AddItem {
        product: Product,
        respond_to: ServiceResponse<CartSnapshot, CartError>,
    },
    SetQuantity {
        id: String,
        quantity: i64,
        respond_to: ServiceResponse<CartSnapshot, CartError>,
    },
    SetPrice {
        id: String,
        price: f64,
        respond_to: ServiceResponse<CartSnapshot, CartError>,
    },
    RemoveItem {
        id: String,
        respond_to: ServiceResponse<CartSnapshot, CartError>,
    },
    Clear {
        respond_to: ServiceResponse<CartSnapshot, CartError>,
    },
    Snapshot {
        respond_to: ServiceResponse<CartSnapshot, CartError>,
    },
    Shutdown,
}
