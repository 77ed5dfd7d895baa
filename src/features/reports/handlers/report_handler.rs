use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath, ValidJson};
use crate::features::reports::dtos::{CreateReportDto, PublishTaskDto, ReportResponseDto};
use crate::features::reports::services::ReportService;
use crate::shared::types::ApiResponse;

/// Submit a repair report
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = CreateReportDto,
    responses(
        (status = 201, description = "Report created", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "reports"
)]
pub async fn create_report(
    State(service): State<Arc<ReportService>>,
    ValidJson(dto): ValidJson<CreateReportDto>,
) -> Result<(StatusCode, Json<ApiResponse<ReportResponseDto>>)> {
    let report = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(report.into()), None, None)),
    ))
}

/// List every report and task with its signup count
#[utoipa::path(
    get,
    path = "/api/reports",
    responses(
        (status = 200, description = "All reports", body = ApiResponse<Vec<ReportResponseDto>>)
    ),
    tag = "reports"
)]
pub async fn list_reports(
    State(service): State<Arc<ReportService>>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let reports = service.list_all().await?;
    let dtos: Vec<ReportResponseDto> = reports.into_iter().map(|r| r.into()).collect();
    Ok(Json(ApiResponse::list(dtos)))
}

/// Publish a report as a task
#[utoipa::path(
    post,
    path = "/api/reports/{id}/publish",
    params(
        ("id" = i64, Path, description = "Report ID")
    ),
    request_body = PublishTaskDto,
    responses(
        (status = 200, description = "Task published", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "INVALID_CAPACITY"),
        (status = 404, description = "Report not found"),
        (status = 409, description = "ALREADY_PUBLISHED")
    ),
    tag = "reports"
)]
pub async fn publish_task(
    State(service): State<Arc<ReportService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<PublishTaskDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let task = service.publish(id, dto.required_students).await?;
    Ok(Json(ApiResponse::success(Some(task.into()), None, None)))
}

/// Mark a task as completed
#[utoipa::path(
    post,
    path = "/api/reports/{id}/complete",
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task completed", body = ApiResponse<ReportResponseDto>),
        (status = 404, description = "Report not found"),
        (status = 409, description = "TASK_NOT_PUBLISHED or ALREADY_COMPLETED")
    ),
    tag = "reports"
)]
pub async fn complete_task(
    State(service): State<Arc<ReportService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let task = service.complete(id).await?;
    Ok(Json(ApiResponse::success(Some(task.into()), None, None)))
}

/// Delete a report or task together with its signups
#[utoipa::path(
    delete,
    path = "/api/reports/{id}",
    params(
        ("id" = i64, Path, description = "Report ID")
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Report not found")
    ),
    tag = "reports"
)]
pub async fn delete_report(
    State(service): State<Arc<ReportService>>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
