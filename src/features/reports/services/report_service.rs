//! Report and task lifecycle: submit, publish, complete, delete.

use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::CreateReportDto;
use crate::features::reports::models::{CreateReport, Report, ReportWithOccupancy};
use crate::modules::store::{self, TaskStore, TaskTransaction};
use crate::shared::constants::{error_codes, MAX_REQUIRED_STUDENTS, STATUS_COMPLETED, STATUS_OPEN};

/// Service for report operations
pub struct ReportService {
    store: Arc<dyn TaskStore>,
}

impl ReportService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// Store a new report; it is not visible to students until published
    pub async fn create(&self, dto: CreateReportDto) -> Result<Report> {
        let input = CreateReport {
            reporter_name: dto.reporter_name.trim().to_string(),
            location: dto.location.trim().to_string(),
            problem_description: dto.problem_description.trim().to_string(),
        };

        let report = self.store.insert_report(&input).await.map_err(|e| {
            tracing::error!("Failed to insert report: {}", e);
            AppError::from(e)
        })?;

        tracing::info!("Report created: id={}", report.id);
        Ok(report)
    }

    /// Every report and task with its current occupancy
    pub async fn list_all(&self) -> Result<Vec<ReportWithOccupancy>> {
        Ok(self.store.list_reports().await?)
    }

    /// Publish a report as a task needing `required_students` volunteers
    pub async fn publish(&self, id: i64, required_students: i32) -> Result<Report> {
        if !(1..=MAX_REQUIRED_STUDENTS).contains(&required_students) {
            return Err(AppError::invalid(
                error_codes::INVALID_CAPACITY,
                format!(
                    "required_students must be between 1 and {}",
                    MAX_REQUIRED_STUDENTS
                ),
            ));
        }

        if let Some(task) = self
            .store
            .publish_task(id, required_students, STATUS_OPEN)
            .await?
        {
            tracing::info!(
                "Task published: id={}, required_students={}",
                task.id,
                task.required_students
            );
            return Ok(task);
        }

        // nothing was updated: either missing or somebody published it first
        match self.store.find_report(id).await? {
            Some(_) => Err(AppError::conflict(
                error_codes::ALREADY_PUBLISHED,
                format!("Report {} is already published", id),
            )),
            None => Err(AppError::NotFound(format!("Report {} not found", id))),
        }
    }

    /// Close a task for new signups. Existing signups are kept.
    ///
    /// Runs under the task's row lock so it is ordered against in-flight
    /// registrations.
    pub async fn complete(&self, id: i64) -> Result<Report> {
        let mut tx = self.store.begin().await?;
        let outcome = Self::close(&mut *tx, id).await;
        let task = store::finish(tx, outcome).await?;

        tracing::info!("Task completed: id={}", task.id);
        Ok(task)
    }

    async fn close(tx: &mut dyn TaskTransaction, id: i64) -> Result<Report> {
        let task = tx
            .lock_task(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        if !task.is_task {
            return Err(AppError::conflict(
                error_codes::TASK_NOT_PUBLISHED,
                format!("Report {} has not been published as a task", id),
            ));
        }
        if task.is_completed {
            return Err(AppError::conflict(
                error_codes::ALREADY_COMPLETED,
                format!("Task {} is already completed", id),
            ));
        }

        Ok(tx.mark_completed(id, STATUS_COMPLETED).await?)
    }

    /// Delete a report or task; its signups go with it
    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.store.delete_report(id).await? {
            return Err(AppError::NotFound(format!("Report {} not found", id)));
        }

        tracing::info!("Report deleted: id={}", id);
        Ok(())
    }
}
