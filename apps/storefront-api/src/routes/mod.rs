//! # HTTP Routes
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  TraceLayer (one span per request)                                      │
//! │  ┌───────────────────────────────────────────────────────────────────┐ │
//! │  │  GET    /products              products::list                     │ │
//! │  │  POST   /products              products::create                   │ │
//! │  │  GET    /products/{id}         products::retrieve                 │ │
//! │  │  PUT    /products/{id}         products::replace                  │ │
//! │  │  PATCH  /products/{id}         products::patch                    │ │
//! │  │  DELETE /products/{id}         products::delete                   │ │
//! │  │                                                                   │ │
//! │  │  GET    /collections           collections::list                  │ │
//! │  │  POST   /collections           collections::create                │ │
//! │  │  GET    /collections/{id}      collections::retrieve              │ │
//! │  │  PUT    /collections/{id}      collections::replace               │ │
//! │  │  PATCH  /collections/{id}      collections::patch                 │ │
//! │  │  DELETE /collections/{id}      collections::delete                │ │
//! │  │                                                                   │ │
//! │  │  GET    /health                health                             │ │
//! │  └───────────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod collections;
pub mod products;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/{id}",
            get(products::retrieve)
                .put(products::replace)
                .patch(products::patch)
                .delete(products::delete),
        )
        .route(
            "/collections",
            get(collections::list).post(collections::create),
        )
        .route(
            "/collections/{id}",
            get(collections::retrieve)
                .put(collections::replace)
                .patch(collections::patch)
                .delete(collections::delete),
        )
        .route("/health", get(health))
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Liveness plus a database round trip.
async fn health(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    if state.db.health_check().await {
        Ok(Json(json!({ "status": "ok", "database": "connected" })))
    } else {
        Err(ApiError::unavailable("Database unavailable"))
    }
}

async fn not_found() -> ApiError {
    ApiError::not_found("No route matches this path")
}
