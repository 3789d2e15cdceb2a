//! Checkout: turns the current cart into an order submission.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::domain::OrderRequest;
use crate::remote::OrderService;
use crate::store::CartStore;
use crate::Result;

pub struct CheckoutCoordinator {
    store: Arc<CartStore>,
    orders: Arc<dyn OrderService>,
}

impl CheckoutCoordinator {
    pub fn new(store: Arc<CartStore>, orders: Arc<dyn OrderService>) -> Self { Self { store, orders } }

    /// Submits the cart as a `PENDING` order for `member_id`.
    ///
    /// On success the local cart is emptied (the remote cart is left to the
    /// order service) and the service response is returned unchanged. On
    /// failure the cart is untouched. An empty cart is rejected before any
    /// request is made; that rejection is a local rule, the order service is
    /// never asked to accept an order without lines.
    pub async fn checkout(&self, member_id: i64, address: &str) -> Result<Value> {
        let state = self.store.state();
        let request = OrderRequest::from_items(member_id, address, state.items())?;
        let lines = request.order_item_list.len();

        let response = match self.orders.create_order(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(member_id, error = %e, "order submission failed");
                return Err(e);
            }
        };

        self.store.reset_after_checkout();
        info!(member_id, lines, total = %state.total(), "order submitted");
        Ok(response)
    }
}
