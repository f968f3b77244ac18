//! In-memory task list repository.

use async_trait::async_trait;

use super::store::MemoryStore;
use crate::domain::{TaskList, TaskListId, UserId};
use crate::ports::{StorageError, StorageResult, TaskListRepository};

/// Thread-safe in-memory task list repository.
#[derive(Debug, Clone)]
pub struct InMemoryTaskListRepository {
    store: MemoryStore,
}

impl InMemoryTaskListRepository {
    /// Creates a repository over the given store.
    #[must_use]
    pub const fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TaskListRepository for InMemoryTaskListRepository {
    async fn create(&self, list: &TaskList) -> StorageResult<()> {
        let mut state = self.store.write()?;
        if state.lists.contains_key(&list.id()) {
            return Err(StorageError::duplicate("task list", "id"));
        }
        state.lists.insert(list.id(), list.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskListId) -> StorageResult<Option<TaskList>> {
        let state = self.store.read()?;
        Ok(state.lists.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner_id: UserId) -> StorageResult<Vec<TaskList>> {
        let state = self.store.read()?;
        let mut lists: Vec<TaskList> = state
            .lists
            .values()
            .filter(|list| list.owner_id() == owner_id)
            .cloned()
            .collect();
        lists.sort_by_key(TaskList::created_at);
        Ok(lists)
    }

    async fn update(&self, list: &TaskList) -> StorageResult<()> {
        let mut state = self.store.write()?;
        if !state.lists.contains_key(&list.id()) {
            return Err(StorageError::not_found("task list", list.id().into_inner()));
        }
        state.lists.insert(list.id(), list.clone());
        Ok(())
    }

    async fn delete(&self, id: TaskListId) -> StorageResult<bool> {
        let mut state = self.store.write()?;
        Ok(state.remove_list_cascade(id))
    }

    async fn list_all(&self) -> StorageResult<Vec<TaskList>> {
        let state = self.store.read()?;
        let mut lists: Vec<TaskList> = state.lists.values().cloned().collect();
        lists.sort_by_key(TaskList::created_at);
        Ok(lists)
    }
}
