use axum::Json;
use serde_json::{Map, Value};

use stockroom_catalog::CatalogProduct;
use stockroom_inventory::ProductDraft;

/// Unwrap an optional JSON object body, treating a missing, undecodable, or
/// empty object body as absent.
pub fn non_empty_object(body: Option<Json<Map<String, Value>>>) -> Option<Map<String, Value>> {
    match body {
        Some(Json(map)) if !map.is_empty() => Some(map),
        _ => None,
    }
}

/// Decode creation fields from a request body. Unknown keys are ignored on
/// creation (only patch passes arbitrary keys through).
pub fn draft_from_body(fields: Map<String, Value>) -> Option<ProductDraft> {
    serde_json::from_value(Value::Object(fields)).ok()
}

/// Map a catalog hit into a creation draft: name and brand fall back to
/// their defaults when absent or empty, price and stock start at zero, and
/// the barcode is the one that was looked up, not whatever the catalog
/// echoed back.
pub fn draft_from_catalog(found: CatalogProduct, barcode: String) -> ProductDraft {
    ProductDraft {
        product_name: non_empty(found.product_name),
        brands: non_empty(found.brands),
        ingredients_text: found.ingredients_text,
        price: Some(0.0),
        stock: Some(0),
        barcode: Some(barcode),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
