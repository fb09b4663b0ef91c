//! API route modules.

pub mod ping;
pub mod records;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the service router for the entity held in state
pub fn create_router(state: Arc<AppState>) -> Router {
    let resource = state.schema.resource;

    Router::new()
        .route("/ping", get(ping::ping))
        .route(
            &format!("/{resource}"),
            get(records::list).post(records::create),
        )
        .route(
            &format!("/{resource}/{{id}}"),
            get(records::get_by_id)
                .put(records::update)
                .delete(records::remove),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
