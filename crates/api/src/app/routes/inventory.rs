use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::{Map, Value};

use stockroom_inventory::ItemId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/:id", get(get_item).patch(patch_item).delete(delete_item))
        .route("/fetch/:barcode", post(create_from_barcode))
}

pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    (StatusCode::OK, Json(services.store.list())).into_response()
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<u64>,
) -> axum::response::Response {
    match services.store.get(ItemId(id)) {
        Some(item) => (StatusCode::OK, Json(item)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "Item not found"),
    }
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    body: Option<Json<Map<String, Value>>>,
) -> axum::response::Response {
    let Some(fields) = dto::non_empty_object(body) else {
        return errors::json_error(StatusCode::BAD_REQUEST, "No data provided");
    };
    let Some(draft) = dto::draft_from_body(fields) else {
        return errors::json_error(StatusCode::BAD_REQUEST, "Invalid request body");
    };

    let item = services.store.insert(draft);
    (StatusCode::CREATED, Json(item)).into_response()
}

pub async fn patch_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<u64>,
    body: Option<Json<Map<String, Value>>>,
) -> axum::response::Response {
    // An unknown id wins over a missing body.
    if services.store.get(ItemId(id)).is_none() {
        return errors::json_error(StatusCode::NOT_FOUND, "Item not found");
    }
    let Some(fields) = dto::non_empty_object(body) else {
        return errors::json_error(StatusCode::BAD_REQUEST, "No data provided");
    };

    match services.store.patch(ItemId(id), fields) {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(err) => errors::store_error_to_response(err),
    }
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<u64>,
) -> axum::response::Response {
    match services.store.delete(ItemId(id)) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Item deleted" })),
        )
            .into_response(),
        Err(err) => errors::store_error_to_response(err),
    }
}

pub async fn create_from_barcode(
    Extension(services): Extension<Arc<AppServices>>,
    Path(barcode): Path<String>,
) -> axum::response::Response {
    let Some(found) = services.catalog.lookup(&barcode).await else {
        return errors::json_error(StatusCode::NOT_FOUND, "Product not found in external API");
    };

    let item = services
        .store
        .insert(dto::draft_from_catalog(found, barcode));
    tracing::info!(id = %item.id, "created item from catalog lookup");
    (StatusCode::CREATED, Json(item)).into_response()
}
