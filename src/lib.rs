//! # Cart Aggregator
//!
//! The cart engine behind an order-entry screen: an ordered set of line items
//! and a running total, kept consistent under add / edit / remove / clear.
//!
//! - [`domain::CartState`] is the state machine and holds every invariant.
//! - [`cart_actor::CartService`] owns the one cart of a session and applies
//!   requests one at a time, in arrival order, replying with a
//!   [`domain::CartSnapshot`].
//! - The catalog is a generic [`actor_framework::ResourceActor`] over
//!   [`domain::Product`].
//! - [`clients::OrderEntryClient`] and [`clients::CheckoutClient`] orchestrate
//!   the actors for the order-entry screen and the confirmation step.
//! - [`app_system::CartSystem`] starts and stops everything.
//!
//! ```no_run
//! # use cart_aggregator::app_system::{AppConfig, CartSystem};
//! # use cart_aggregator::domain::{CheckoutRequest, Customer, ProductCreate};
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let system = CartSystem::new(&AppConfig::default());
//! let id = system.catalog_client.create_product(ProductCreate::new("Tea", 3.0)).await?;
//! system.order_entry_client.select_product(id).await?;
//!
//! let customer = Customer::new("Ann", "ann@example.com", "555-0100");
//! let receipt = system.checkout_client.confirm(CheckoutRequest::cash(customer, 5.0)).await?;
//! assert_eq!(receipt.change_due, Some(2.0));
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod actor_framework;
pub mod app_system;
pub mod cart_actor;
pub mod catalog;
pub mod clients;
pub mod domain;
pub mod error;

#[cfg(test)]
mod mock_framework;
