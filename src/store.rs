//! Cart store: the single mutation path for cart state.
//!
//! Every action goes through [`CartStore::dispatch`], which runs the reducer
//! under the state lock and then notifies [`ItemsObserver`]s while still
//! holding it, so observers see changes in dispatch order. The lock is never
//! held across a remote call.
//!
//! Remote sync is deliberately asymmetric, matching the storefront's existing
//! behaviour: [`CartStore::add_item`] updates local state before the remote
//! call and keeps the line if that call fails, while [`CartStore::clear_cart`]
//! only clears locally after the remote clear succeeded.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::{reduce, CartAction, CartItem, CartState, ProductId, ProductSnapshot};
use crate::persistence::CartPersistence;
use crate::remote::{AddToCartRequest, CartService};
use crate::Result;

/// Notified after each dispatch that changed the item list.
pub trait ItemsObserver: Send + Sync {
    fn items_changed(&self, items: &[CartItem]);
}

pub struct CartStore {
    state: Mutex<CartState>,
    observers: RwLock<Vec<Arc<dyn ItemsObserver>>>,
    snapshots: watch::Sender<CartState>,
    cart_service: Arc<dyn CartService>,
}

impl CartStore {
    pub fn new(initial: CartState, cart_service: Arc<dyn CartService>) -> Self {
        let (snapshots, _) = watch::channel(initial.clone());
        Self { state: Mutex::new(initial), observers: RwLock::new(Vec::new()), snapshots, cart_service }
    }

    /// Hydrates from `persistence` and keeps it subscribed to item changes.
    pub fn open(persistence: CartPersistence, cart_service: Arc<dyn CartService>) -> Self {
        let initial = persistence.hydrate();
        info!(items = initial.items().len(), total = %initial.total(), "cart hydrated");
        let store = Self::new(initial, cart_service);
        store.add_observer(Arc::new(persistence));
        store
    }

    pub fn add_observer(&self, observer: Arc<dyn ItemsObserver>) {
        self.observers.write().unwrap_or_else(PoisonError::into_inner).push(observer);
    }

    /// Receives a fresh snapshot whenever the item list changes.
    pub fn subscribe(&self) -> watch::Receiver<CartState> { self.snapshots.subscribe() }

    pub fn state(&self) -> CartState { self.state.lock().unwrap_or_else(PoisonError::into_inner).clone() }

    fn dispatch(&self, action: CartAction) -> CartState {
        let name = action.name();
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let next = reduce(&state, action);
        let changed = next.items() != state.items();
        *state = next.clone();
        debug!(action = name, changed, items = next.items().len(), total = %next.total(), "cart action dispatched");
        if changed {
            for observer in self.observers.read().unwrap_or_else(PoisonError::into_inner).iter() {
                observer.items_changed(next.items());
            }
            self.snapshots.send_replace(next.clone());
        }
        next
    }

    /// Adds one unit locally, then tells the cart service. A remote failure is
    /// returned but the local line stays.
    pub async fn add_item(&self, item: ProductSnapshot) -> Result<()> {
        let request = AddToCartRequest::single(&item);
        self.dispatch(CartAction::AddItem(item));
        if let Err(e) = self.cart_service.add_to_cart(&request).await {
            warn!(product_id = %request.product_id, error = %e, "remote add failed; keeping local line");
            return Err(e);
        }
        Ok(())
    }

    pub fn remove_item(&self, product_id: ProductId) -> CartState { self.dispatch(CartAction::RemoveItem(product_id)) }

    /// A quantity of zero or less removes the line.
    pub fn update_quantity(&self, product_id: ProductId, quantity: i64) -> CartState {
        self.dispatch(CartAction::UpdateQuantity { product_id, quantity })
    }

    /// Clears the remote cart first; local state only changes if that succeeds.
    pub async fn clear_cart(&self) -> Result<()> {
        self.cart_service.clear_cart().await?;
        self.dispatch(CartAction::ClearCart);
        info!("cart cleared");
        Ok(())
    }

    /// Replaces local items with a server-provided snapshot.
    pub fn set_cart_items(&self, items: Vec<CartItem>) -> CartState { self.dispatch(CartAction::LoadCart(Some(items))) }

    /// Pulls the server cart and reconciles local state with it. A payload
    /// that is not an item list empties the cart.
    pub async fn refresh_from_server(&self) -> Result<CartState> {
        let payload = self.cart_service.fetch_cart().await?;
        Ok(self.dispatch(CartAction::load_from_json(payload)))
    }

    pub(crate) fn reset_after_checkout(&self) -> CartState { self.dispatch(CartAction::ClearCart) }
}
