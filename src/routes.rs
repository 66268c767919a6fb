//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `/api/groups/*` - Group CRUD
//! - `/api/users/*`  - User CRUD
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Localization** - Message bodies rendered per `Accept-Language`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{locale, tracing};
use crate::state::AppState;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the routed application without path normalization.
///
/// Handler tests drive this directly; [`app_router`] wraps it for serving.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api::routes::routes())
        .layer(middleware::from_fn_with_state(state.clone(), locale::layer))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// `/api/users/` and `/api/users` reach the same handler.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
