//! Registration coordinator - the only path that creates signups.
//!
//! A registration is one store transaction:
//!
//! 1. lock the task row (the only point where a request waits on another)
//! 2. task must exist, be published, and not be completed
//! 3. the student must not already be signed up
//! 4. occupancy counted under the lock must be below capacity
//! 5. insert and commit
//!
//! The duplicate check runs before the capacity check so a student who is
//! already on a full task is told they are signed up, not that it is full.
//! Any rejection rolls back. Two requests racing for the last slot are
//! ordered by who gets the lock first; the loser sees `TaskFull`.

use std::sync::Arc;

use thiserror::Error;

use crate::core::error::AppError;
use crate::features::tasks::models::{Signup, StudentName};
use crate::features::tasks::services::capacity;
use crate::modules::store::{self, StoreError, TaskStore, TaskTransaction};
use crate::shared::constants::error_codes;

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("{0}")]
    InvalidStudentName(&'static str),

    #[error("Task {0} not found")]
    TaskNotFound(i64),

    #[error("Report {0} has not been published as a task")]
    TaskNotPublished(i64),

    #[error("Task {0} is completed and no longer accepts signups")]
    TaskClosed(i64),

    #[error("Task {task_id} is full ({capacity} students)")]
    TaskFull { task_id: i64, capacity: i32 },

    #[error("{student_name} is already signed up for task {task_id}")]
    DuplicateSignup { task_id: i64, student_name: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RegistrationError {
    /// Code sent to clients in `ApiResponse::errors`
    pub fn code(&self) -> Option<&'static str> {
        match self {
            RegistrationError::InvalidStudentName(_) => None,
            RegistrationError::TaskNotFound(_) => Some(error_codes::TASK_NOT_FOUND),
            RegistrationError::TaskNotPublished(_) => Some(error_codes::TASK_NOT_PUBLISHED),
            RegistrationError::TaskClosed(_) => Some(error_codes::TASK_CLOSED),
            RegistrationError::TaskFull { .. } => Some(error_codes::TASK_FULL),
            RegistrationError::DuplicateSignup { .. } => Some(error_codes::DUPLICATE_SIGNUP),
            RegistrationError::Store(StoreError::Busy(_)) => Some(error_codes::BUSY),
            RegistrationError::Store(_) => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, RegistrationError::Store(e) if e.is_retryable())
    }
}

impl From<RegistrationError> for AppError {
    fn from(e: RegistrationError) -> Self {
        let message = e.to_string();
        match e {
            RegistrationError::InvalidStudentName(msg) => AppError::Validation(msg.to_string()),
            RegistrationError::TaskNotFound(_) => {
                AppError::not_found_code(error_codes::TASK_NOT_FOUND, message)
            }
            RegistrationError::TaskNotPublished(_) => {
                AppError::conflict(error_codes::TASK_NOT_PUBLISHED, message)
            }
            RegistrationError::TaskClosed(_) => {
                AppError::conflict(error_codes::TASK_CLOSED, message)
            }
            RegistrationError::TaskFull { .. } => {
                AppError::conflict(error_codes::TASK_FULL, message)
            }
            RegistrationError::DuplicateSignup { .. } => {
                AppError::conflict(error_codes::DUPLICATE_SIGNUP, message)
            }
            RegistrationError::Store(store_err) => store_err.into(),
        }
    }
}

pub struct RegistrationService {
    store: Arc<dyn TaskStore>,
}

impl RegistrationService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// Sign `student_name` up for `task_id`.
    ///
    /// The name is trimmed and checked before the store is touched. Retrying
    /// after a `Busy` error is safe: a repeated attempt that already went
    /// through comes back as `DuplicateSignup`.
    pub async fn register(
        &self,
        task_id: i64,
        student_name: &str,
    ) -> Result<Signup, RegistrationError> {
        let student = StudentName::parse(student_name)
            .map_err(RegistrationError::InvalidStudentName)?;

        let mut tx = self.store.begin().await?;
        let outcome = Self::admit(&mut *tx, task_id, &student).await;
        let result = Self::settle(tx, outcome, task_id, &student).await;

        match &result {
            Ok(signup) => tracing::info!(
                "Student signed up: task_id={}, signup_id={}, student={}",
                task_id,
                signup.id,
                signup.student_name
            ),
            Err(e) if e.is_retryable() => {
                tracing::warn!("Signup gave up waiting: task_id={}, error={}", task_id, e)
            }
            Err(RegistrationError::Store(e)) => {
                tracing::error!("Signup failed: task_id={}, error={}", task_id, e)
            }
            Err(e) => tracing::debug!(
                "Signup rejected: task_id={}, code={}, reason={}",
                task_id,
                e.code().unwrap_or("INVALID"),
                e
            ),
        }

        result
    }

    /// Commit or roll back; a unique violation at commit is a duplicate that
    /// slipped past the check in `admit`.
    async fn settle(
        tx: Box<dyn TaskTransaction>,
        outcome: Result<Signup, RegistrationError>,
        task_id: i64,
        student: &StudentName,
    ) -> Result<Signup, RegistrationError> {
        store::finish(tx, outcome).await.map_err(|e| match e {
            RegistrationError::Store(StoreError::UniqueViolation(_)) => {
                RegistrationError::DuplicateSignup {
                    task_id,
                    student_name: student.to_string(),
                }
            }
            other => other,
        })
    }

    async fn admit(
        tx: &mut dyn TaskTransaction,
        task_id: i64,
        student: &StudentName,
    ) -> Result<Signup, RegistrationError> {
        let task = tx
            .lock_task(task_id)
            .await?
            .ok_or(RegistrationError::TaskNotFound(task_id))?;

        if !task.is_task {
            return Err(RegistrationError::TaskNotPublished(task_id));
        }
        if task.is_completed {
            return Err(RegistrationError::TaskClosed(task_id));
        }

        if tx.signup_exists(task_id, student.as_str()).await? {
            return Err(RegistrationError::DuplicateSignup {
                task_id,
                student_name: student.to_string(),
            });
        }

        let occupancy = tx.count_signups(task_id).await?;
        if capacity::evaluate(task.required_students, occupancy).is_full() {
            return Err(RegistrationError::TaskFull {
                task_id,
                capacity: task.required_students,
            });
        }

        match tx.insert_signup(task_id, student.as_str()).await {
            Ok(signup) => Ok(signup),
            Err(StoreError::UniqueViolation(_)) => Err(RegistrationError::DuplicateSignup {
                task_id,
                student_name: student.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}
