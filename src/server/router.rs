//! Routes shared by every gateway: health, screen index, unknown screens

use crate::screens::ScreenInfo;
use crate::server::handlers::{health_check, list_screens, unknown_screen};
use axum::{
    Router,
    routing::{any, get},
};
use std::sync::Arc;

/// Build the routes that do not belong to a single screen
///
/// - GET /health, GET /healthz
/// - GET /api/screens
/// - any /api/{screen} or /api/{screen}/... without a registered screen → 404
pub fn build_common_routes(infos: Vec<ScreenInfo>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/api/screens", get(list_screens))
        .route("/api/{screen}", any(unknown_screen))
        .route("/api/{screen}/{*rest}", any(unknown_screen))
        .with_state(Arc::new(infos))
}
