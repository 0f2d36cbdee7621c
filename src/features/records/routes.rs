use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;

use crate::features::records::handlers;
use crate::features::records::services::RecordService;

/// Create routes for the records feature
///
/// `max_upload_size` bounds the whole multipart body of `POST /api/records`.
pub fn routes(service: Arc<RecordService>, max_upload_size: usize) -> Router {
    Router::new()
        .route(
            "/api/records",
            get(handlers::list_records)
                .post(handlers::create_record)
                .layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route(
            "/api/records/{id}",
            get(handlers::get_record)
                .put(handlers::update_record)
                .delete(handlers::delete_record),
        )
        .with_state(service)
}
