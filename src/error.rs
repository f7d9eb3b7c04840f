use thiserror::Error;

use crate::cart_actor::CartError;
use crate::catalog::CatalogError;

/// Errors surfaced to the order-entry screen.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderEntryError {
    #[error("Unknown product: {0}")]
    UnknownProduct(String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error("Background task failed: {0}")]
    TaskFailed(String),
}

/// Errors that can occur while reviewing or confirming an order.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Please input the customer's {0}")]
    MissingCustomerField(&'static str),
    #[error(transparent)]
    Cart(#[from] CartError),
}
