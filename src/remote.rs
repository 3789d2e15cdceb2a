//! Remote cart and order services.
//!
//! The store only talks to the traits; [`HttpBackend`] is the REST
//! implementation used by the binary.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::domain::{Money, OrderRequest, ProductId, ProductSnapshot};
use crate::persistence::TokenStore;
use crate::{CartError, Result};

/// Body of `POST /carts`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub quantity: i64,
    pub name: String,
    pub price: Money,
    pub farm: String,
    pub image: String,
}

impl AddToCartRequest {
    pub fn single(snapshot: &ProductSnapshot) -> Self {
        Self {
            product_id: snapshot.product_id,
            quantity: 1,
            name: snapshot.name.clone(),
            price: snapshot.price,
            farm: snapshot.farm.clone(),
            image: snapshot.image.clone(),
        }
    }
}

#[async_trait]
pub trait CartService: Send + Sync {
    async fn add_to_cart(&self, request: &AddToCartRequest) -> Result<()>;
    async fn clear_cart(&self) -> Result<()>;
    /// Server-side cart snapshot, untyped; the store validates it.
    async fn fetch_cart(&self) -> Result<Value>;
}

#[async_trait]
pub trait OrderService: Send + Sync {
    /// Submits the order and returns the service response as-is.
    async fn create_order(&self, request: &OrderRequest) -> Result<Value>;
}

/// REST client for the cart and order services.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    tokens: TokenStore,
}

impl HttpBackend {
    pub fn new(config: &Config, tokens: TokenStore) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;
        Ok(Self { client, base_url: config.api_base_url.trim_end_matches('/').to_string(), tokens })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.client.request(method, format!("{}{}", self.base_url, path));
        match self.tokens.authorization_header() {
            Some(header) => request.header(AUTHORIZATION, header),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "remote call completed");
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(CartError::Remote { status: status.as_u16(), message })
    }

    async fn json_body(response: Response) -> Result<Value> {
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }
}

#[async_trait]
impl CartService for HttpBackend {
    async fn add_to_cart(&self, request: &AddToCartRequest) -> Result<()> {
        self.send(self.request(Method::POST, "/carts").json(request)).await?;
        Ok(())
    }

    async fn clear_cart(&self) -> Result<()> {
        self.send(self.request(Method::DELETE, "/carts")).await?;
        Ok(())
    }

    async fn fetch_cart(&self) -> Result<Value> {
        let response = self.send(self.request(Method::GET, "/carts")).await?;
        Self::json_body(response).await
    }
}

#[async_trait]
impl OrderService for HttpBackend {
    async fn create_order(&self, request: &OrderRequest) -> Result<Value> {
        let response = self.send(self.request(Method::POST, "/orders").json(request)).await?;
        Self::json_body(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_request_body() {
        let snapshot = ProductSnapshot { product_id: ProductId::new(1), name: "Tomato".into(), price: Money::new(1000), original_price: Some(Money::new(1200)), image: "img".into(), farm: "X".into() };
        let body = serde_json::to_value(AddToCartRequest::single(&snapshot)).unwrap();
        assert_eq!(body, serde_json::json!({
            "productId": 1, "quantity": 1, "name": "Tomato", "price": 1000, "farm": "X", "image": "img"
        }));
    }
}
