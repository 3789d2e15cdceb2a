//! Aggregates module
pub mod cart;
pub mod order;

pub use cart::{CartItem, CartState, ProductSnapshot};
pub use order::{OrderError, OrderLine, OrderRequest, OrderStatus};
