//! Cart actions
use serde_json::Value;
use crate::domain::aggregates::{CartItem, ProductSnapshot};
use crate::domain::value_objects::ProductId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CartAction {
    AddItem(ProductSnapshot),
    RemoveItem(ProductId),
    UpdateQuantity { product_id: ProductId, quantity: i64 },
    ClearCart,
    /// Replace the item list wholesale. `None` stands for a candidate that was
    /// not a valid item sequence.
    LoadCart(Option<Vec<CartItem>>),
}

impl CartAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddItem(_) => "ADD_ITEM",
            Self::RemoveItem(_) => "REMOVE_ITEM",
            Self::UpdateQuantity { .. } => "UPDATE_QUANTITY",
            Self::ClearCart => "CLEAR_CART",
            Self::LoadCart(_) => "LOAD_CART",
        }
    }

    /// Builds a `LoadCart` from an untyped payload such as a stored value or a
    /// server response. Anything but an array of decodable items becomes `None`.
    pub fn load_from_json(value: Value) -> Self {
        // Decoding is all-or-nothing: a line that does not even decode means the
        // payload is not a cart we understand, so none of it is trusted. Lines
        // that decode but break an invariant are dropped one by one in `reduce`.
        let candidate = match value {
            Value::Array(_) => serde_json::from_value::<Vec<CartItem>>(value).ok(),
            _ => None,
        };
        Self::LoadCart(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_from_non_array() {
        assert_eq!(CartAction::load_from_json(json!({"items": []})), CartAction::LoadCart(None));
        assert_eq!(CartAction::load_from_json(json!("cart")), CartAction::LoadCart(None));
        assert_eq!(CartAction::load_from_json(Value::Null), CartAction::LoadCart(None));
    }

    #[test]
    fn test_load_from_array() {
        let action = CartAction::load_from_json(json!([
            {"productId": 3, "name": "Kale", "price": 300, "image": "k.png", "farm": "Y", "quantity": 2}
        ]));
        let CartAction::LoadCart(Some(items)) = action else { panic!("expected items") };
        assert_eq!(items[0].product_id, ProductId::new(3));
        assert_eq!(items[0].original_price, None);
    }

    #[test]
    fn test_load_from_array_of_garbage() {
        assert_eq!(CartAction::load_from_json(json!([1, 2, 3])), CartAction::LoadCart(None));
    }
}
