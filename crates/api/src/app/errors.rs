use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockroom_inventory::StoreError;

/// Every documented failure is a JSON object with a single `error` key and
/// an English message; internals never leak.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({ "error": message.into() })),
    )
        .into_response()
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::NotFound => json_error(StatusCode::NOT_FOUND, "Item not found"),
        StoreError::InvalidPatch(field) => json_error(
            StatusCode::BAD_REQUEST,
            format!("Invalid value for field '{field}'"),
        ),
    }
}
