//! Farmers' Market Cart
//!
//! Shopping-cart store for the farmers' market storefront.
//!
//! ## Features
//! - Pure cart reducer with derived totals
//! - Durable local persistence of the item list
//! - Optimistic add / pessimistic clear against the remote cart service
//! - Checkout into an order submission

pub mod checkout;
pub mod config;
pub mod domain;
pub mod persistence;
pub mod remote;
pub mod store;

pub use checkout::CheckoutCoordinator;
pub use config::Config;
pub use domain::{CartAction, CartItem, CartState, Money, OrderLine, OrderRequest, OrderStatus, ProductId, ProductSnapshot};
pub use persistence::{CartPersistence, FileStorage, KeyValueStorage, MemoryStorage, TokenStore};
pub use remote::{CartService, HttpBackend, OrderService};
pub use store::{CartStore, ItemsObserver};

use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum CartError {
    #[error("Remote service returned {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for CartError {
    fn from(err: reqwest::Error) -> Self { Self::Network(err.to_string()) }
}

impl From<serde_json::Error> for CartError {
    fn from(err: serde_json::Error) -> Self { Self::Serialization(err.to_string()) }
}

impl From<std::io::Error> for CartError {
    fn from(err: std::io::Error) -> Self { Self::Storage(err.to_string()) }
}

impl From<domain::aggregates::OrderError> for CartError {
    fn from(err: domain::aggregates::OrderError) -> Self {
        match err { domain::aggregates::OrderError::NoItems => Self::EmptyCart }
    }
}

pub type Result<T> = std::result::Result<T, CartError>;
