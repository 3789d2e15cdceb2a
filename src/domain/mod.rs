//! Cart domain: value objects, aggregates, actions and the reducer
pub mod actions;
pub mod aggregates;
pub mod reducer;
pub mod value_objects;

pub use actions::CartAction;
pub use aggregates::{CartItem, CartState, OrderLine, OrderRequest, OrderStatus, ProductSnapshot};
pub use reducer::reduce;
pub use value_objects::{Money, ProductId};
