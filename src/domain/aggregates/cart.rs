//! Cart Aggregate

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::domain::value_objects::{Money, ProductId};

/// One product line in the cart, keyed by `product_id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_line"))]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub farm: String,
    pub quantity: i64,
}

/// Product fields captured when an item is added; a `CartItem` without quantity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    pub product_id: ProductId,
    pub name: String,
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub farm: String,
}

impl CartItem {
    pub fn from_snapshot(snapshot: ProductSnapshot, quantity: i64) -> Self {
        let ProductSnapshot { product_id, name, price, original_price, image, farm } = snapshot;
        Self { product_id, name, price, original_price, image, farm, quantity }
    }

    pub fn line_total(&self) -> Money { self.price.multiply(self.quantity) }

    /// Per-unit discount against the pre-discount price, zero when none was recorded.
    pub fn unit_discount(&self) -> Money {
        self.original_price.map_or(Money::ZERO, |original| original.saturating_sub(self.price))
    }
}

fn validate_line(item: &CartItem) -> Result<(), ValidationError> {
    if item.quantity < 1 { return Err(ValidationError::new("non_positive_quantity")); }
    Ok(())
}

/// Full cart snapshot. `total` and `item_count` are derived from `items` and
/// only ever computed in [`CartState::from_items`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    items: Vec<CartItem>,
    total: Money,
    item_count: i64,
}

impl CartState {
    pub fn empty() -> Self { Self::default() }

    pub(crate) fn from_items(items: Vec<CartItem>) -> Self {
        let total = items.iter().map(CartItem::line_total).sum();
        let item_count = items.iter().map(|i| i.quantity).fold(0_i64, i64::saturating_add);
        Self { items, total, item_count }
    }

    pub fn items(&self) -> &[CartItem] { &self.items }
    pub fn total(&self) -> Money { self.total }
    pub fn item_count(&self) -> i64 { self.item_count }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
    pub fn get(&self, product_id: ProductId) -> Option<&CartItem> { self.items.iter().find(|i| i.product_id == product_id) }
    pub fn into_items(self) -> Vec<CartItem> { self.items }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, price: i64, quantity: i64) -> CartItem {
        CartItem { product_id: ProductId::new(id), name: "Tomato".into(), price: Money::new(price), original_price: None, image: "img".into(), farm: "X".into(), quantity }
    }

    #[test]
    fn test_derived_totals() {
        let state = CartState::from_items(vec![item(1, 1000, 2), item(2, 500, 1)]);
        assert_eq!(state.total(), Money::new(2500));
        assert_eq!(state.item_count(), 3);
        assert!(CartState::empty().is_empty());
    }

    #[test]
    fn test_item_validation() {
        assert!(item(1, 100, 1).validate().is_ok());
        assert!(item(1, 100, 0).validate().is_err());
        // any price ADD_ITEM accepts must also survive a reload
        assert!(item(1, -5, 1).validate().is_ok());
    }

    #[test]
    fn test_wire_shape() {
        let mut line = item(1, 900, 2);
        line.original_price = Some(Money::new(1000));
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["productId"], 1);
        assert_eq!(json["originalPrice"], 1000);
        assert_eq!(line.unit_discount(), Money::new(100));

        let plain = serde_json::to_value(item(2, 500, 1)).unwrap();
        assert!(plain.get("originalPrice").is_none());
    }
}
