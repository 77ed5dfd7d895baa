use utoipa::{Modify, OpenApi};

use crate::features::reports::{dtos as reports_dtos, handlers as reports_handlers};
use crate::features::tasks::{dtos as tasks_dtos, handlers as tasks_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Reports
        reports_handlers::create_report,
        reports_handlers::list_reports,
        reports_handlers::publish_task,
        reports_handlers::complete_task,
        reports_handlers::delete_report,
        // Tasks
        tasks_handlers::list_tasks,
        tasks_handlers::register_for_task,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Reports
            reports_dtos::CreateReportDto,
            reports_dtos::PublishTaskDto,
            reports_dtos::ReportResponseDto,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            // Tasks
            tasks_dtos::SignupDto,
            tasks_dtos::SignupResponseDto,
            tasks_dtos::TaskBoardEntryDto,
            ApiResponse<tasks_dtos::SignupResponseDto>,
            ApiResponse<Vec<tasks_dtos::TaskBoardEntryDto>>,
        )
    ),
    tags(
        (name = "reports", description = "Repair reports and task lifecycle"),
        (name = "tasks", description = "Student task board and signups"),
    ),
    info(
        title = "Repairdesk API",
        version = "0.1.0",
        description = "API documentation for Repairdesk",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
