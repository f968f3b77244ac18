//! Shared state backing the in-memory repositories.
//!
//! All three in-memory repositories operate on one [`MemoryStore`] so that
//! referential behaviour matches a single database: deleting a list removes
//! its tasks, and deleting a user removes their lists and clears any task
//! assignments pointing at them.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::{PersistedTaskData, Task, TaskId, TaskList, TaskListId, User, UserId};
use crate::ports::{StorageError, StorageResult};

/// Handle to the shared in-memory state.
///
/// Cloning the store yields another handle to the same state, so the three
/// repositories built from one store see each other's writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

#[derive(Debug, Default)]
pub(super) struct MemoryState {
    pub(super) users: HashMap<UserId, User>,
    pub(super) lists: HashMap<TaskListId, TaskList>,
    pub(super) tasks: HashMap<TaskId, Task>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn read(&self) -> StorageResult<RwLockReadGuard<'_, MemoryState>> {
        self.state
            .read()
            .map_err(|err| StorageError::persistence(std::io::Error::other(err.to_string())))
    }

    pub(super) fn write(&self) -> StorageResult<RwLockWriteGuard<'_, MemoryState>> {
        self.state
            .write()
            .map_err(|err| StorageError::persistence(std::io::Error::other(err.to_string())))
    }
}

impl MemoryState {
    /// Removes a list and every task it contains.
    ///
    /// Returns `false` when the list did not exist.
    pub(super) fn remove_list_cascade(&mut self, list_id: TaskListId) -> bool {
        if self.lists.remove(&list_id).is_none() {
            return false;
        }
        self.tasks.retain(|_, task| task.list_id() != list_id);
        true
    }

    /// Removes a user, their owned lists with contained tasks, and clears
    /// assignments referencing them in surviving tasks.
    ///
    /// Returns `false` when the user did not exist.
    pub(super) fn remove_user_cascade(&mut self, user_id: UserId) -> bool {
        if self.users.remove(&user_id).is_none() {
            return false;
        }

        let owned: Vec<TaskListId> = self
            .lists
            .values()
            .filter(|list| list.owner_id() == user_id)
            .map(TaskList::id)
            .collect();
        for list_id in owned {
            self.remove_list_cascade(list_id);
        }

        for task in self.tasks.values_mut() {
            if task.assigned_to() == Some(user_id) {
                *task = clear_assignment(task);
            }
        }
        true
    }
}

/// Rebuilds a task with its assignment cleared, leaving every other field
/// untouched. Mirrors `ON DELETE SET NULL` on the assignment column.
fn clear_assignment(task: &Task) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: task.id(),
        list_id: task.list_id(),
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status(),
        priority: task.priority(),
        due_date: task.due_date(),
        assigned_to: None,
        completed_at: task.completed_at(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}
