use std::time::Duration;

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use sqlx::{PgPool, Postgres, Transaction};

use super::{StoreError, TaskStore, TaskTransaction};
use crate::features::reports::models::{CreateReport, Report, ReportWithOccupancy};
use crate::features::tasks::models::{Signup, TaskBoardEntry};
use crate::shared::constants::STATUS_REPORTED;

const REPORT_COLUMNS: &str = "id, reporter_name, location, problem_description, status, \
     is_task, required_students, is_completed, created_at, updated_at";

const SIGNUP_COLUMNS: &str = "id, task_id, student_name, created_at";

const LIST_REPORTS_SQL: &str = "\
    SELECT r.id, r.reporter_name, r.location, r.problem_description, r.status, \
           r.is_task, r.required_students, r.is_completed, r.created_at, r.updated_at, \
           COUNT(s.id) AS occupancy \
    FROM reports r \
    LEFT JOIN signups s ON s.task_id = r.id \
    GROUP BY r.id \
    ORDER BY r.id";

const OPEN_TASKS_SQL: &str = "\
    SELECT r.id, r.location, r.problem_description, r.required_students, \
           COUNT(s.id) AS occupancy, \
           COALESCE( \
               ARRAY_AGG(s.student_name ORDER BY s.id) FILTER (WHERE s.id IS NOT NULL), \
               ARRAY[]::TEXT[] \
           ) AS student_names \
    FROM reports r \
    LEFT JOIN signups s ON s.task_id = r.id \
    WHERE r.is_task AND NOT r.is_completed \
    GROUP BY r.id \
    ORDER BY r.id";

/// PostgreSQL-backed store. Registration locks the task row with `SELECT ... FOR UPDATE`.
#[derive(Clone)]
pub struct PgTaskStore {
    pool: PgPool,
    lock_timeout: Duration,
}

impl std::fmt::Debug for PgTaskStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgTaskStore")
            .field("pool", &"<PgPool>")
            .field("lock_timeout", &self.lock_timeout)
            .finish()
    }
}

impl PgTaskStore {
    pub fn new(pool: PgPool, lock_timeout: Duration) -> Self {
        Self { pool, lock_timeout }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn insert_report(&self, input: &CreateReport) -> Result<Report, StoreError> {
        let query = format!(
            "INSERT INTO reports (reporter_name, location, problem_description, status) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {REPORT_COLUMNS}"
        );
        let report = sqlx::query_as::<_, Report>(&query)
            .bind(&input.reporter_name)
            .bind(&input.location)
            .bind(&input.problem_description)
            .bind(STATUS_REPORTED)
            .fetch_one(&self.pool)
            .await?;
        Ok(report)
    }

    async fn find_report(&self, id: i64) -> Result<Option<Report>, StoreError> {
        let query = format!("SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1");
        let report = sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(report)
    }

    async fn list_reports(&self) -> Result<Vec<ReportWithOccupancy>, StoreError> {
        let rows = sqlx::query_as::<_, ReportWithOccupancy>(LIST_REPORTS_SQL)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn publish_task(
        &self,
        id: i64,
        required_students: i32,
        status: &str,
    ) -> Result<Option<Report>, StoreError> {
        let query = format!(
            "UPDATE reports \
             SET is_task = TRUE, required_students = $2, status = $3, updated_at = NOW() \
             WHERE id = $1 AND is_task = FALSE \
             RETURNING {REPORT_COLUMNS}"
        );
        let report = sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .bind(required_students)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?;
        Ok(report)
    }

    async fn delete_report(&self, id: i64) -> Result<bool, StoreError> {
        // signups go with it through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    fn open_tasks(&self) -> BoxStream<'_, Result<TaskBoardEntry, StoreError>> {
        sqlx::query_as::<_, TaskBoardEntry>(OPEN_TASKS_SQL)
            .fetch(&self.pool)
            .map_err(StoreError::from)
            .boxed()
    }

    async fn begin(&self) -> Result<Box<dyn TaskTransaction>, StoreError> {
        let mut tx = self.pool.begin().await?;

        // Scoped to this transaction only (is_local = true)
        sqlx::query("SELECT set_config('lock_timeout', $1, true)")
            .bind(format!("{}ms", self.lock_timeout.as_millis()))
            .execute(&mut *tx)
            .await?;

        Ok(Box::new(PgTaskTransaction { tx }))
    }
}

struct PgTaskTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl TaskTransaction for PgTaskTransaction {
    async fn lock_task(&mut self, task_id: i64) -> Result<Option<Report>, StoreError> {
        let query = format!("SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1 FOR UPDATE");
        let report = sqlx::query_as::<_, Report>(&query)
            .bind(task_id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(report)
    }

    async fn count_signups(&mut self, task_id: i64) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM signups WHERE task_id = $1")
            .bind(task_id)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(count)
    }

    async fn signup_exists(
        &mut self,
        task_id: i64,
        student_name: &str,
    ) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM signups WHERE task_id = $1 AND student_name = $2)",
        )
        .bind(task_id)
        .bind(student_name)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(exists)
    }

    async fn insert_signup(
        &mut self,
        task_id: i64,
        student_name: &str,
    ) -> Result<Signup, StoreError> {
        let query = format!(
            "INSERT INTO signups (task_id, student_name) VALUES ($1, $2) \
             RETURNING {SIGNUP_COLUMNS}"
        );
        let signup = sqlx::query_as::<_, Signup>(&query)
            .bind(task_id)
            .bind(student_name)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(signup)
    }

    async fn mark_completed(&mut self, task_id: i64, status: &str) -> Result<Report, StoreError> {
        let query = format!(
            "UPDATE reports SET is_completed = TRUE, status = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {REPORT_COLUMNS}"
        );
        let report = sqlx::query_as::<_, Report>(&query)
            .bind(task_id)
            .bind(status)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(report)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.rollback().await?;
        Ok(())
    }
}
