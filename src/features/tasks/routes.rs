use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::tasks::handlers::{self, TaskState};
use crate::features::tasks::services::{RegistrationService, TaskBoardService};

/// Create routes for the student-facing task board
///
/// Public: students sign up by name, no account required.
pub fn routes(
    board_service: Arc<TaskBoardService>,
    registration_service: Arc<RegistrationService>,
) -> Router {
    let state = TaskState {
        board_service,
        registration_service,
    };

    Router::new()
        .route("/api/tasks", get(handlers::list_tasks))
        .route("/api/tasks/{id}/signups", post(handlers::register_for_task))
        .with_state(state)
}
