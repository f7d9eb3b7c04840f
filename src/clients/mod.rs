//! Client handles for the actors, plus the orchestrating clients that the
//! order-entry screen and checkout talk to.

#[macro_use]
mod macros;

pub mod cart_client;
pub mod catalog_client;
pub mod checkout_client;
pub mod order_entry_client;

pub use cart_client::*;
pub use catalog_client::*;
pub use checkout_client::*;
pub use order_entry_client::*;
