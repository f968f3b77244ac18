//! In-memory task repository.

use async_trait::async_trait;

use super::store::MemoryStore;
use crate::domain::{Task, TaskId, TaskListId, TaskStatus, UserId};
use crate::ports::{StorageError, StorageResult, TaskFilter, TaskRepository};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository {
    store: MemoryStore,
}

impl InMemoryTaskRepository {
    /// Creates a repository over the given store.
    #[must_use]
    pub const fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: &Task) -> StorageResult<()> {
        let mut state = self.store.write()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(StorageError::duplicate("task", "id"));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> StorageResult<Option<Task>> {
        let state = self.store.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_by_list(
        &self,
        list_id: TaskListId,
        filter: &TaskFilter,
    ) -> StorageResult<Vec<Task>> {
        let state = self.store.read()?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.list_id() == list_id && filter.matches(task))
            .cloned()
            .collect();
        tasks.sort_by_key(Task::created_at);
        Ok(tasks)
    }

    async fn find_by_assignee(&self, user_id: UserId) -> StorageResult<Vec<Task>> {
        let state = self.store.read()?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.assigned_to() == Some(user_id))
            .cloned()
            .collect();
        tasks.sort_by_key(Task::created_at);
        Ok(tasks)
    }

    async fn update(&self, task: &Task) -> StorageResult<()> {
        let mut state = self.store.write()?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(StorageError::not_found("task", task.id().into_inner()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> StorageResult<bool> {
        let mut state = self.store.write()?;
        Ok(state.tasks.remove(&id).is_some())
    }

    async fn count_by_list_and_status(
        &self,
        list_id: TaskListId,
        status: TaskStatus,
    ) -> StorageResult<u64> {
        let state = self.store.read()?;
        let count = state
            .tasks
            .values()
            .filter(|task| task.list_id() == list_id && task.status() == status)
            .count();
        u64::try_from(count).map_err(StorageError::persistence)
    }
}
