//! Typed HTTP wrapper around the inventory service.

use reqwest::StatusCode;
use serde_json::{Map, Value};
use thiserror::Error;

use stockroom_inventory::{InventoryItem, ProductDraft};

/// Errors surfaced to the menu layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service could not be reached, or its answer was undecodable.
    #[error("could not reach the API: {0}")]
    Connection(#[from] reqwest::Error),

    /// The service answered 404 for the requested item or barcode.
    #[error("not found")]
    NotFound,

    /// Any other non-success answer.
    #[error("unexpected response: {0}")]
    Unexpected(StatusCode),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn list_items(&self) -> ApiResult<Vec<InventoryItem>> {
        let response = self
            .http
            .get(format!("{}/inventory", self.base_url))
            .send()
            .await?;
        Ok(check(response, StatusCode::OK)?.json().await?)
    }

    pub async fn get_item(&self, id: u64) -> ApiResult<InventoryItem> {
        let response = self
            .http
            .get(format!("{}/inventory/{id}", self.base_url))
            .send()
            .await?;
        Ok(check(response, StatusCode::OK)?.json().await?)
    }

    pub async fn create_item(&self, draft: &ProductDraft) -> ApiResult<InventoryItem> {
        let response = self
            .http
            .post(format!("{}/inventory", self.base_url))
            .json(draft)
            .send()
            .await?;
        Ok(check(response, StatusCode::CREATED)?.json().await?)
    }

    pub async fn patch_item(&self, id: u64, fields: &Map<String, Value>) -> ApiResult<InventoryItem> {
        let response = self
            .http
            .patch(format!("{}/inventory/{id}", self.base_url))
            .json(fields)
            .send()
            .await?;
        Ok(check(response, StatusCode::OK)?.json().await?)
    }

    pub async fn delete_item(&self, id: u64) -> ApiResult<()> {
        let response = self
            .http
            .delete(format!("{}/inventory/{id}", self.base_url))
            .send()
            .await?;
        check(response, StatusCode::OK)?;
        Ok(())
    }

    pub async fn create_from_barcode(&self, barcode: &str) -> ApiResult<InventoryItem> {
        let response = self
            .http
            .post(format!("{}/inventory/fetch/{barcode}", self.base_url))
            .send()
            .await?;
        Ok(check(response, StatusCode::CREATED)?.json().await?)
    }
}

fn check(response: reqwest::Response, expected: StatusCode) -> ApiResult<reqwest::Response> {
    match response.status() {
        status if status == expected => Ok(response),
        StatusCode::NOT_FOUND => Err(ApiError::NotFound),
        status => Err(ApiError::Unexpected(status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        http::StatusCode as HttpStatus,
        routing::{get, post},
    };
    use serde_json::json;

    fn sample_item() -> serde_json::Value {
        json!({
            "id": 1,
            "status": 1,
            "product": {
                "product_name": "Test Product",
                "brands": "Test Brand",
                "ingredients_text": "Test ingredients",
                "price": 1.23,
                "stock": 5,
                "barcode": "1234567890"
            }
        })
    }

    async fn spawn_service(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn list_items_decodes_the_inventory_array() {
        let app = Router::new().route(
            "/inventory",
            get(|| async { Json(json!([sample_item()])) }),
        );
        let client = ApiClient::new(spawn_service(app).await);

        let items = client.list_items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product.product_name, "Test Product");
        assert_eq!(items[0].product.stock, 5);
    }

    #[tokio::test]
    async fn a_404_maps_to_not_found() {
        let app = Router::new().route(
            "/inventory/:id",
            get(|| async {
                (HttpStatus::NOT_FOUND, Json(json!({ "error": "Item not found" })))
            }),
        );
        let client = ApiClient::new(spawn_service(app).await);

        match client.get_item(42).await {
            Err(ApiError::NotFound) => {}
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_from_barcode_decodes_the_created_item() {
        let app = Router::new().route(
            "/inventory/fetch/:barcode",
            post(|| async { (HttpStatus::CREATED, Json(sample_item())) }),
        );
        let client = ApiClient::new(spawn_service(app).await);

        let item = client.create_from_barcode("1234567890").await.unwrap();
        assert_eq!(item.product.barcode, "1234567890");
    }

    #[tokio::test]
    async fn connection_failure_maps_to_connection_error() {
        // Nothing listens on port 1.
        let client = ApiClient::new("http://127.0.0.1:1");
        match client.list_items().await {
            Err(ApiError::Connection(_)) => {}
            other => panic!("expected Connection, got {other:?}"),
        }
    }
}
