//! HTTP application wiring (axum router + service wiring).
//!
//! - `services.rs`: process-scope wiring (store + catalog client)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request body decoding and mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(services: AppServices) -> Router {
    Router::new()
        .route("/", get(routes::system::home))
        .nest("/inventory", routes::inventory::router())
        .layer(Extension(Arc::new(services)))
        .layer(ServiceBuilder::new())
}
