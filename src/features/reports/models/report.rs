use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for a repair report; `is_task` marks it as a published task
#[derive(Debug, Clone, FromRow)]
pub struct Report {
    pub id: i64,
    pub reporter_name: String,
    pub location: String,
    pub problem_description: String,
    pub status: String,
    pub is_task: bool,
    /// Volunteer capacity, 0 until the report is published
    pub required_students: i32,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new report
#[derive(Debug, Clone)]
pub struct CreateReport {
    pub reporter_name: String,
    pub location: String,
    pub problem_description: String,
}

/// Report row joined with its current signup count
#[derive(Debug, Clone, FromRow)]
pub struct ReportWithOccupancy {
    #[sqlx(flatten)]
    pub report: Report,
    pub occupancy: i64,
}
