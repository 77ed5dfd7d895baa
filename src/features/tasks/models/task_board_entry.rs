use sqlx::FromRow;

/// One open task on the student task board, with who has signed up so far
#[derive(Debug, Clone, FromRow)]
pub struct TaskBoardEntry {
    pub id: i64,
    pub location: String,
    pub problem_description: String,
    pub required_students: i32,
    pub occupancy: i64,
    /// In signup order
    pub student_names: Vec<String>,
}
