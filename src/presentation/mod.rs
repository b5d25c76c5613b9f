// Presentation layer - HTTP routing
pub mod app_state;
pub mod handlers;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{health_check, price_history};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/coins/:id/history", get(price_history))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
