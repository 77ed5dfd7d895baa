use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::core::error::Result;
use crate::core::extractor::{AppPath, ValidJson};
use crate::features::tasks::dtos::{SignupDto, SignupResponseDto, TaskBoardEntryDto};
use crate::features::tasks::services::{RegistrationService, TaskBoardService};
use crate::shared::types::ApiResponse;

/// State for task handlers
#[derive(Clone)]
pub struct TaskState {
    pub board_service: Arc<TaskBoardService>,
    pub registration_service: Arc<RegistrationService>,
}

/// List open tasks with their current signups
#[utoipa::path(
    get,
    path = "/api/tasks",
    responses(
        (status = 200, description = "Open tasks", body = ApiResponse<Vec<TaskBoardEntryDto>>),
        (status = 503, description = "Store unavailable")
    ),
    tag = "tasks"
)]
pub async fn list_tasks(
    State(state): State<TaskState>,
) -> Result<Json<ApiResponse<Vec<TaskBoardEntryDto>>>> {
    let entries = state.board_service.list_published().await?;
    Ok(Json(ApiResponse::list(entries)))
}

/// Sign a student up for a task
///
/// `errors[0]` carries the rejection code on 404/409/503.
#[utoipa::path(
    post,
    path = "/api/tasks/{id}/signups",
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    request_body = SignupDto,
    responses(
        (status = 201, description = "Signed up", body = ApiResponse<SignupResponseDto>),
        (status = 400, description = "Invalid student name"),
        (status = 404, description = "TASK_NOT_FOUND"),
        (status = 409, description = "TASK_NOT_PUBLISHED, TASK_CLOSED, TASK_FULL or DUPLICATE_SIGNUP"),
        (status = 503, description = "BUSY, safe to retry")
    ),
    tag = "tasks"
)]
pub async fn register_for_task(
    State(state): State<TaskState>,
    AppPath(id): AppPath<i64>,
    ValidJson(dto): ValidJson<SignupDto>,
) -> Result<(StatusCode, Json<ApiResponse<SignupResponseDto>>)> {
    let signup = state
        .registration_service
        .register(id, &dto.student_name)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(signup.into()),
            Some("Signed up".to_string()),
            None,
        )),
    ))
}
