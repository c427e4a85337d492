//! Route table for `/api`.

mod account;
mod assets;
mod dashboard;
mod labs;
mod maintenance;
mod params;
mod pcs;

use crate::auth::require_auth;
use crate::error::ApiError;
use crate::middleware::log_requests;
use crate::state::AppState;
use axum::http::StatusCode;
use axum::{middleware, Router};
use tower_http::cors::CorsLayer;

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(labs::routes())
        .merge(pcs::routes())
        .merge(assets::routes())
        .merge(maintenance::routes())
        .merge(dashboard::routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let api = Router::new().merge(account::routes()).merge(protected);

    let mut router = Router::new()
        .nest("/api", api)
        .fallback(not_found)
        .layer(middleware::from_fn(log_requests))
        .with_state(state.clone());
    if state.config.cors {
        router = router.layer(CorsLayer::permissive());
    }
    router
}

async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "no such route")
}
