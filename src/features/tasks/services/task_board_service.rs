//! Task board - the student-facing read side

use std::sync::Arc;

use futures::TryStreamExt;

use crate::core::error::Result;
use crate::features::tasks::dtos::TaskBoardEntryDto;
use crate::modules::store::TaskStore;

pub struct TaskBoardService {
    store: Arc<dyn TaskStore>,
}

impl TaskBoardService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// Published tasks that are not completed, oldest first.
    ///
    /// Counts and names are read fresh on every call; full tasks stay on the
    /// board with zero remaining slots.
    pub async fn list_published(&self) -> Result<Vec<TaskBoardEntryDto>> {
        let entries: Vec<TaskBoardEntryDto> = self
            .store
            .open_tasks()
            .map_ok(TaskBoardEntryDto::from)
            .try_collect()
            .await
            .map_err(|e| {
                tracing::error!("Failed to load task board: {}", e);
                e
            })?;

        tracing::debug!("Task board loaded: open_tasks={}", entries.len());
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::tasks::services::RegistrationService;
    use crate::shared::test_helpers::{complete_task, memory_store, seed_report, seed_task};

    #[tokio::test]
    async fn test_empty_board() {
        let store = memory_store();
        let service = TaskBoardService::new(store);

        let entries = service.list_published().await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_only_open_tasks_are_listed() {
        let store = memory_store();
        let _unpublished = seed_report(store.as_ref()).await;
        let open = seed_task(store.as_ref(), 3).await;
        let done = seed_task(store.as_ref(), 1).await;
        complete_task(store.as_ref(), done.id).await;

        let entries = TaskBoardService::new(store).list_published().await.unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, open.id);
        assert_eq!(entries[0].description, open.problem_description);
        assert_eq!(entries[0].remaining_slots, 3);
    }

    #[tokio::test]
    async fn test_board_reflects_signups_in_order() {
        let store = memory_store();
        let task = seed_task(store.as_ref(), 2).await;
        let registration = RegistrationService::new(store.clone());
        registration.register(task.id, "Bea").await.unwrap();
        registration.register(task.id, "Ana").await.unwrap();

        let entries = TaskBoardService::new(store).list_published().await.unwrap();

        let entry = &entries[0];
        assert_eq!(entry.occupancy, 2);
        assert_eq!(entry.remaining_slots, 0);
        assert_eq!(entry.student_names, vec!["Bea", "Ana"]);
    }

    #[tokio::test]
    async fn test_tasks_are_ordered_by_id() {
        let store = memory_store();
        let first = seed_task(store.as_ref(), 1).await;
        let second = seed_task(store.as_ref(), 1).await;

        let ids: Vec<i64> = TaskBoardService::new(store)
            .list_published()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();

        assert_eq!(ids, vec![first.id, second.id]);
    }
}
