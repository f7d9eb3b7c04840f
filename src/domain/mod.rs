pub mod product;
pub mod line_item;
pub mod cart;
pub mod order;

pub use product::*;
pub use line_item::*;
pub use cart::*;
pub use order::*;
