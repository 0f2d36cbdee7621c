use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::pages::handlers;
use crate::features::records::RecordService;

/// Create routes for the HTML pages
pub fn routes(service: Arc<RecordService>) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/records/{id}", get(handlers::record_detail))
        .with_state(service)
}
