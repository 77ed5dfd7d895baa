use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::reports::handlers;
use crate::features::reports::services::ReportService;

/// Create routes for the reports feature
pub fn routes(service: Arc<ReportService>) -> Router {
    Router::new()
        .route(
            "/api/reports",
            get(handlers::list_reports).post(handlers::create_report),
        )
        .route("/api/reports/{id}", axum::routing::delete(handlers::delete_report))
        .route("/api/reports/{id}/publish", post(handlers::publish_task))
        .route("/api/reports/{id}/complete", post(handlers::complete_task))
        .with_state(service)
}
