//! Order submission built from a cart

use serde::{Deserialize, Serialize};
use crate::domain::aggregates::cart::CartItem;
use crate::domain::value_objects::{Money, ProductId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus { #[default] Pending }

/// One line of an order-create request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price: Money,
    pub discount_value: Money,
    pub total_price: Money,
}

impl From<&CartItem> for OrderLine {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price: item.price,
            discount_value: item.unit_discount(),
            total_price: item.line_total(),
        }
    }
}

/// Body of `POST /orders`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub member_id: i64,
    pub address: String,
    pub status: OrderStatus,
    pub order_item_list: Vec<OrderLine>,
}

impl OrderRequest {
    pub fn from_items(member_id: i64, address: impl Into<String>, items: &[CartItem]) -> Result<Self, OrderError> {
        if items.is_empty() { return Err(OrderError::NoItems); }
        Ok(Self {
            member_id,
            address: address.into(),
            status: OrderStatus::Pending,
            order_item_list: items.iter().map(OrderLine::from).collect(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub enum OrderError { NoItems }
impl std::error::Error for OrderError {}
impl std::fmt::Display for OrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self { Self::NoItems => write!(f, "No items") }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discounted() -> CartItem {
        CartItem { product_id: ProductId::new(1), name: "Tomato".into(), price: Money::new(900), original_price: Some(Money::new(1000)), image: "img".into(), farm: "X".into(), quantity: 2 }
    }

    #[test]
    fn test_line_mapping() {
        let line = OrderLine::from(&discounted());
        assert_eq!(line.unit_price, Money::new(900));
        assert_eq!(line.discount_value, Money::new(100));
        assert_eq!(line.total_price, Money::new(1800));
    }

    #[test]
    fn test_line_without_original_price_has_no_discount() {
        let mut item = discounted();
        item.original_price = None;
        assert_eq!(OrderLine::from(&item).discount_value, Money::ZERO);
    }

    #[test]
    fn test_request_body() {
        let request = OrderRequest::from_items(7, "Seoul", &[discounted()]).unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, serde_json::json!({
            "memberId": 7,
            "address": "Seoul",
            "status": "PENDING",
            "orderItemList": [
                { "productId": 1, "quantity": 2, "unitPrice": 900, "discountValue": 100, "totalPrice": 1800 }
            ]
        }));
    }

    #[test]
    fn test_empty_order_rejected() {
        assert_eq!(OrderRequest::from_items(7, "Seoul", &[]), Err(OrderError::NoItems));
    }
}
