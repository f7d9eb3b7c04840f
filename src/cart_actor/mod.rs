//! The cart aggregator actor: sole owner of the session's `CartState`.

pub mod error;
pub mod messages;
pub mod service;

pub use error::*;
pub use messages::*;
pub use service::*;
