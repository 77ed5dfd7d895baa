use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::reports::models::{Report, ReportWithOccupancy};
use crate::shared::constants::{MAX_DESCRIPTION_CHARS, MAX_LOCATION_CHARS, MAX_REPORTER_NAME_CHARS};
use crate::shared::validation::validate_not_blank;

/// Request DTO for submitting a repair report
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateReportDto {
    #[validate(
        custom(function = "validate_not_blank"),
        length(
            max = MAX_REPORTER_NAME_CHARS,
            message = "Reporter name must not exceed 100 characters"
        )
    )]
    pub reporter_name: String,

    #[validate(
        custom(function = "validate_not_blank"),
        length(max = MAX_LOCATION_CHARS, message = "Location must not exceed 200 characters")
    )]
    pub location: String,

    #[validate(
        custom(function = "validate_not_blank"),
        length(
            max = MAX_DESCRIPTION_CHARS,
            message = "Problem description must not exceed 2000 characters"
        )
    )]
    pub problem_description: String,
}

/// Request DTO for publishing a report as a task
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PublishTaskDto {
    /// Number of students needed, at least 1
    pub required_students: i32,
}

/// Response DTO for a report or task
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
    pub id: i64,
    pub reporter_name: String,
    pub location: String,
    pub problem_description: String,
    /// `reported`, `open` or `completed`
    pub status: String,
    pub is_task: bool,
    pub required_students: i32,
    pub is_completed: bool,
    /// Current signups, only set in listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupancy: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            reporter_name: r.reporter_name,
            location: r.location,
            problem_description: r.problem_description,
            status: r.status,
            is_task: r.is_task,
            required_students: r.required_students,
            is_completed: r.is_completed,
            occupancy: None,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

impl From<ReportWithOccupancy> for ReportResponseDto {
    fn from(r: ReportWithOccupancy) -> Self {
        Self {
            occupancy: Some(r.occupancy),
            ..r.report.into()
        }
    }
}
