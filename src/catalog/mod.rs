//! Product catalog: the read-mostly source of `{id, name, price}` records.

pub mod entity;
pub mod error;

pub use error::*;
