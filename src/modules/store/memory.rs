//! In-process [`TaskStore`] used by the test suite.
//!
//! Mirrors the PostgreSQL locking discipline: one async mutex per task id
//! stands in for the row lock, writes are buffered in the transaction and
//! applied on commit, and the `(task_id, student_name)` uniqueness check runs
//! again at commit time like the database constraint would.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use super::{StoreError, TaskStore, TaskTransaction};
use crate::features::reports::models::{CreateReport, Report, ReportWithOccupancy};
use crate::features::tasks::models::{Signup, TaskBoardEntry};
use crate::shared::constants::STATUS_REPORTED;

const UNIQUE_CONSTRAINT: &str = "signups_task_student_unique";

#[derive(Default)]
struct MemoryState {
    next_report_id: i64,
    next_signup_id: i64,
    reports: BTreeMap<i64, Report>,
    signups: Vec<Signup>,
}

impl MemoryState {
    fn occupancy(&self, task_id: i64) -> i64 {
        self.signups.iter().filter(|s| s.task_id == task_id).count() as i64
    }

    fn has_signup(&self, task_id: i64, student_name: &str) -> bool {
        self.signups
            .iter()
            .any(|s| s.task_id == task_id && s.student_name == student_name)
    }
}

#[derive(Clone, Default)]
pub struct MemoryTaskStore {
    state: Arc<Mutex<MemoryState>>,
    row_locks: Arc<Mutex<HashMap<i64, Arc<AsyncMutex<()>>>>>,
    lock_timeout: Option<Duration>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give up on a row lock after `timeout` with [`StoreError::Busy`]
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = Some(timeout);
        self
    }

    /// Committed signups for a task, in insertion order
    pub fn signups_for(&self, task_id: i64) -> Vec<Signup> {
        self.state()
            .signups
            .iter()
            .filter(|s| s.task_id == task_id)
            .cloned()
            .collect()
    }

    /// Total committed signups across every task
    pub fn signup_count(&self) -> usize {
        self.state().signups.len()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        lock_state(&self.state)
    }

    async fn lock_row(&self, id: i64) -> Result<OwnedMutexGuard<()>, StoreError> {
        let row_lock = {
            let mut locks = self
                .row_locks
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            Arc::clone(locks.entry(id).or_default())
        };

        match self.lock_timeout {
            Some(timeout) => tokio::time::timeout(timeout, row_lock.lock_owned())
                .await
                .map_err(|_| StoreError::Busy(format!("lock timeout on report {}", id))),
            None => Ok(row_lock.lock_owned().await),
        }
    }
}

fn lock_state(state: &Mutex<MemoryState>) -> MutexGuard<'_, MemoryState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn insert_report(&self, input: &CreateReport) -> Result<Report, StoreError> {
        let mut state = self.state();
        state.next_report_id += 1;
        let now = Utc::now();
        let report = Report {
            id: state.next_report_id,
            reporter_name: input.reporter_name.clone(),
            location: input.location.clone(),
            problem_description: input.problem_description.clone(),
            status: STATUS_REPORTED.to_string(),
            is_task: false,
            required_students: 0,
            is_completed: false,
            created_at: now,
            updated_at: now,
        };
        state.reports.insert(report.id, report.clone());
        Ok(report)
    }

    async fn find_report(&self, id: i64) -> Result<Option<Report>, StoreError> {
        Ok(self.state().reports.get(&id).cloned())
    }

    async fn list_reports(&self) -> Result<Vec<ReportWithOccupancy>, StoreError> {
        let state = self.state();
        Ok(state
            .reports
            .values()
            .map(|report| ReportWithOccupancy {
                report: report.clone(),
                occupancy: state.occupancy(report.id),
            })
            .collect())
    }

    async fn publish_task(
        &self,
        id: i64,
        required_students: i32,
        status: &str,
    ) -> Result<Option<Report>, StoreError> {
        let mut state = self.state();
        let Some(report) = state.reports.get_mut(&id).filter(|r| !r.is_task) else {
            return Ok(None);
        };
        report.is_task = true;
        report.required_students = required_students;
        report.status = status.to_string();
        report.updated_at = Utc::now();
        Ok(Some(report.clone()))
    }

    async fn delete_report(&self, id: i64) -> Result<bool, StoreError> {
        // DELETE waits for in-flight row locks in PostgreSQL too
        let _row = self.lock_row(id).await?;
        let mut state = self.state();
        if state.reports.remove(&id).is_none() {
            return Ok(false);
        }
        state.signups.retain(|s| s.task_id != id);
        Ok(true)
    }

    fn open_tasks(&self) -> BoxStream<'_, Result<TaskBoardEntry, StoreError>> {
        let entries: Vec<_> = {
            let state = self.state();
            state
                .reports
                .values()
                .filter(|r| r.is_task && !r.is_completed)
                .map(|r| {
                    let student_names: Vec<String> = state
                        .signups
                        .iter()
                        .filter(|s| s.task_id == r.id)
                        .map(|s| s.student_name.clone())
                        .collect();
                    TaskBoardEntry {
                        id: r.id,
                        location: r.location.clone(),
                        problem_description: r.problem_description.clone(),
                        required_students: r.required_students,
                        occupancy: student_names.len() as i64,
                        student_names,
                    }
                })
                .collect()
        };
        stream::iter(entries.into_iter().map(Ok)).boxed()
    }

    async fn begin(&self) -> Result<Box<dyn TaskTransaction>, StoreError> {
        Ok(Box::new(MemoryTransaction {
            store: self.clone(),
            row_guards: Vec::new(),
            pending_signups: Vec::new(),
            pending_reports: BTreeMap::new(),
        }))
    }
}

struct MemoryTransaction {
    store: MemoryTaskStore,
    row_guards: Vec<OwnedMutexGuard<()>>,
    pending_signups: Vec<Signup>,
    pending_reports: BTreeMap<i64, Report>,
}

impl MemoryTransaction {
    fn visible_report(&self, id: i64) -> Option<Report> {
        self.pending_reports
            .get(&id)
            .cloned()
            .or_else(|| self.store.state().reports.get(&id).cloned())
    }
}

#[async_trait]
impl TaskTransaction for MemoryTransaction {
    async fn lock_task(&mut self, task_id: i64) -> Result<Option<Report>, StoreError> {
        let guard = self.store.lock_row(task_id).await?;
        self.row_guards.push(guard);
        Ok(self.visible_report(task_id))
    }

    async fn count_signups(&mut self, task_id: i64) -> Result<i64, StoreError> {
        let committed = self.store.state().occupancy(task_id);
        let pending = self
            .pending_signups
            .iter()
            .filter(|s| s.task_id == task_id)
            .count() as i64;
        Ok(committed + pending)
    }

    async fn signup_exists(
        &mut self,
        task_id: i64,
        student_name: &str,
    ) -> Result<bool, StoreError> {
        let pending = self
            .pending_signups
            .iter()
            .any(|s| s.task_id == task_id && s.student_name == student_name);
        Ok(pending || self.store.state().has_signup(task_id, student_name))
    }

    async fn insert_signup(
        &mut self,
        task_id: i64,
        student_name: &str,
    ) -> Result<Signup, StoreError> {
        if self.signup_exists(task_id, student_name).await? {
            return Err(StoreError::UniqueViolation(UNIQUE_CONSTRAINT.to_string()));
        }

        let signup = {
            let mut state = self.store.state();
            if !state.reports.contains_key(&task_id) {
                return Err(StoreError::Database(sqlx::Error::RowNotFound));
            }
            state.next_signup_id += 1;
            Signup {
                id: state.next_signup_id,
                task_id,
                student_name: student_name.to_string(),
                created_at: Utc::now(),
            }
        };
        self.pending_signups.push(signup.clone());
        Ok(signup)
    }

    async fn mark_completed(&mut self, task_id: i64, status: &str) -> Result<Report, StoreError> {
        let mut report = self
            .visible_report(task_id)
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))?;
        report.is_completed = true;
        report.status = status.to_string();
        report.updated_at = Utc::now();
        self.pending_reports.insert(task_id, report.clone());
        Ok(report)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let this = *self;
        let mut state = this.store.state();

        for signup in &this.pending_signups {
            if state.has_signup(signup.task_id, &signup.student_name) {
                return Err(StoreError::UniqueViolation(UNIQUE_CONSTRAINT.to_string()));
            }
        }
        for (id, report) in this.pending_reports {
            if let Some(stored) = state.reports.get_mut(&id) {
                *stored = report;
            }
        }
        state.signups.extend(this.pending_signups);
        // row guards drop here, after the writes are visible
        drop(state);
        drop(this.row_guards);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        Ok(())
    }
}
