//! Task store - the persistence boundary for reports, tasks and signups.
//!
//! Services never talk to the database directly. Anything that must see a
//! task's capacity and its signups consistently runs inside a
//! [`TaskTransaction`], which holds the task's row lock from
//! [`TaskTransaction::lock_task`] until it is committed, rolled back or
//! dropped. Dropping an unfinished transaction rolls it back, so a cancelled
//! request never leaves a partial signup behind.

mod error;
#[cfg(test)]
mod memory;
mod postgres;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::features::reports::models::{CreateReport, Report, ReportWithOccupancy};
use crate::features::tasks::models::{Signup, TaskBoardEntry};

pub use error::StoreError;
#[cfg(test)]
pub use memory::MemoryTaskStore;
pub use postgres::PgTaskStore;

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn insert_report(&self, input: &CreateReport) -> Result<Report, StoreError>;

    async fn find_report(&self, id: i64) -> Result<Option<Report>, StoreError>;

    /// Every report and task with its signup count, oldest first
    async fn list_reports(&self) -> Result<Vec<ReportWithOccupancy>, StoreError>;

    /// Turn an unpublished report into a task.
    ///
    /// Returns `None` when no *unpublished* report with this id exists, so a
    /// concurrent second publish cannot overwrite the capacity.
    async fn publish_task(
        &self,
        id: i64,
        required_students: i32,
        status: &str,
    ) -> Result<Option<Report>, StoreError>;

    /// Delete a report together with its signups. Returns `false` if it did not exist.
    async fn delete_report(&self, id: i64) -> Result<bool, StoreError>;

    /// Open tasks for the student board, computed fresh on every call
    fn open_tasks(&self) -> BoxStream<'_, Result<TaskBoardEntry, StoreError>>;

    /// Start a transaction for capacity-affecting work
    async fn begin(&self) -> Result<Box<dyn TaskTransaction>, StoreError>;
}

#[async_trait]
pub trait TaskTransaction: Send {
    /// Lock the report row for the rest of the transaction and return it
    async fn lock_task(&mut self, task_id: i64) -> Result<Option<Report>, StoreError>;

    async fn count_signups(&mut self, task_id: i64) -> Result<i64, StoreError>;

    async fn signup_exists(&mut self, task_id: i64, student_name: &str)
        -> Result<bool, StoreError>;

    /// Fails with [`StoreError::UniqueViolation`] if the student already has a signup
    async fn insert_signup(
        &mut self,
        task_id: i64,
        student_name: &str,
    ) -> Result<Signup, StoreError>;

    async fn mark_completed(&mut self, task_id: i64, status: &str) -> Result<Report, StoreError>;

    async fn commit(self: Box<Self>) -> Result<(), StoreError>;

    async fn rollback(self: Box<Self>) -> Result<(), StoreError>;
}

/// Commit `tx` if `outcome` is `Ok`, otherwise roll it back and return the original error.
///
/// A failed rollback is only logged: the connection drops the transaction anyway.
pub async fn finish<T, E>(tx: Box<dyn TaskTransaction>, outcome: Result<T, E>) -> Result<T, E>
where
    E: From<StoreError>,
{
    match outcome {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!("Rollback failed: {}", rollback_err);
            }
            Err(e)
        }
    }
}
