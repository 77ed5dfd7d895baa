use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::shared::validation::normalize_student_name;

/// Database model for a student's signup on a task
#[derive(Debug, Clone, FromRow)]
pub struct Signup {
    pub id: i64,
    pub task_id: i64,
    pub student_name: String,
    pub created_at: DateTime<Utc>,
}

/// A student name that has been trimmed and checked.
///
/// Registration only accepts this type, so the store never sees raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentName(String);

impl StudentName {
    pub fn parse(raw: &str) -> Result<Self, &'static str> {
        normalize_student_name(raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StudentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
