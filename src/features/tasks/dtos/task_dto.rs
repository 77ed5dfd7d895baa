use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::tasks::models::{Signup, TaskBoardEntry};
use crate::features::tasks::services::capacity;
use crate::shared::validation::validate_student_name;

/// Request DTO for signing up to a task
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignupDto {
    /// Leading and trailing whitespace is ignored
    #[validate(custom(function = "validate_student_name"))]
    pub student_name: String,
}

/// Response DTO for a created signup
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignupResponseDto {
    pub id: i64,
    pub task_id: i64,
    pub student_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Signup> for SignupResponseDto {
    fn from(s: Signup) -> Self {
        Self {
            id: s.id,
            task_id: s.task_id,
            student_name: s.student_name,
            created_at: s.created_at,
        }
    }
}

/// One row of the student task board
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskBoardEntryDto {
    pub id: i64,
    pub location: String,
    pub description: String,
    pub required_students: i32,
    pub occupancy: i64,
    pub remaining_slots: i64,
    /// In signup order
    pub student_names: Vec<String>,
}

impl From<TaskBoardEntry> for TaskBoardEntryDto {
    fn from(e: TaskBoardEntry) -> Self {
        Self {
            id: e.id,
            remaining_slots: capacity::remaining_slots(e.required_students, e.occupancy),
            location: e.location,
            description: e.problem_description,
            required_students: e.required_students,
            occupancy: e.occupancy,
            student_names: e.student_names,
        }
    }
}
