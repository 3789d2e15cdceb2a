//! Cart state transitions.
//!
//! [`reduce`] is pure: it never touches storage or the network, and every
//! state it returns was built through [`CartState::from_items`], so the
//! derived totals always match the item list.

use std::collections::HashSet;

use tracing::warn;
use validator::Validate;

use crate::domain::actions::CartAction;
use crate::domain::aggregates::{CartItem, CartState};
use crate::domain::value_objects::ProductId;

/// Computes the state that follows `state` after `action`.
pub fn reduce(state: &CartState, action: CartAction) -> CartState {
    match action {
        CartAction::AddItem(snapshot) => {
            let mut items = state.items().to_vec();
            match items.iter_mut().find(|i| i.product_id == snapshot.product_id) {
                Some(existing) => existing.quantity = existing.quantity.saturating_add(1),
                None => items.push(CartItem::from_snapshot(snapshot, 1)),
            }
            CartState::from_items(items)
        }
        CartAction::RemoveItem(product_id) => remove(state, product_id),
        CartAction::UpdateQuantity { product_id, quantity } if quantity <= 0 => remove(state, product_id),
        CartAction::UpdateQuantity { product_id, quantity } => {
            let items = state
                .items()
                .iter()
                .cloned()
                .map(|mut i| {
                    if i.product_id == product_id { i.quantity = quantity; }
                    i
                })
                .collect();
            CartState::from_items(items)
        }
        CartAction::ClearCart => CartState::empty(),
        CartAction::LoadCart(candidate) => CartState::from_items(normalize(candidate.unwrap_or_default())),
    }
}

fn remove(state: &CartState, product_id: ProductId) -> CartState {
    CartState::from_items(state.items().iter().filter(|i| i.product_id != product_id).cloned().collect())
}

/// Drops lines that would break the cart invariants: non-positive quantity
/// and repeats of a product already seen (first occurrence wins).
fn normalize(items: Vec<CartItem>) -> Vec<CartItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| {
            if let Err(errors) = item.validate() {
                warn!(product_id = %item.product_id, ?errors, "dropping invalid cart line");
                return false;
            }
            if !seen.insert(item.product_id) {
                warn!(product_id = %item.product_id, "dropping duplicate cart line");
                return false;
            }
            true
        })
        .collect()
}
