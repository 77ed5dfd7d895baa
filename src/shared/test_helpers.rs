//! Fixtures shared by unit and HTTP tests

use std::sync::Arc;

use axum::Router;
use fake::faker::address::en::StreetName;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::Fake;

use crate::features::reports::models::{CreateReport, Report};
use crate::features::reports::{routes as reports_routes, ReportService};
use crate::features::tasks::{routes as tasks_routes, RegistrationService, TaskBoardService};
use crate::modules::store::{MemoryTaskStore, TaskStore};
use crate::shared::constants::{STATUS_COMPLETED, STATUS_OPEN};

pub fn memory_store() -> Arc<MemoryTaskStore> {
    Arc::new(MemoryTaskStore::new())
}

/// Unpublished report with generated text
pub async fn seed_report(store: &dyn TaskStore) -> Report {
    let input = CreateReport {
        reporter_name: Name().fake(),
        location: StreetName().fake(),
        problem_description: Sentence(3..8).fake(),
    };
    store
        .insert_report(&input)
        .await
        .expect("seed report")
}

/// Open task needing `capacity` students
pub async fn seed_task(store: &dyn TaskStore, capacity: i32) -> Report {
    let report = seed_report(store).await;
    store
        .publish_task(report.id, capacity, STATUS_OPEN)
        .await
        .expect("publish seed task")
        .expect("seed report is unpublished")
}

pub async fn complete_task(store: &dyn TaskStore, task_id: i64) -> Report {
    let mut tx = store.begin().await.expect("begin");
    tx.lock_task(task_id).await.expect("lock task");
    let task = tx
        .mark_completed(task_id, STATUS_COMPLETED)
        .await
        .expect("mark completed");
    tx.commit().await.expect("commit");
    task
}

/// Both feature routers wired to `store`, as `main` does with PostgreSQL
pub fn build_test_app(store: Arc<MemoryTaskStore>) -> Router {
    let store: Arc<dyn TaskStore> = store;
    Router::new()
        .merge(reports_routes::routes(Arc::new(ReportService::new(
            store.clone(),
        ))))
        .merge(tasks_routes::routes(
            Arc::new(TaskBoardService::new(store.clone())),
            Arc::new(RegistrationService::new(store)),
        ))
}
