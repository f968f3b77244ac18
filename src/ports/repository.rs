//! Repository ports for user, task list, and task persistence.

use crate::domain::{Task, TaskId, TaskList, TaskListId, TaskPriority, TaskStatus, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors returned by repository implementations.
///
/// The same error vocabulary covers every repository: adapters translate
/// backend-specific failures into these variants so services can map them
/// onto application errors without knowing the backend.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// No stored row matched the identifier.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record that was looked up.
        entity: &'static str,
        /// Identifier that matched nothing.
        id: Uuid,
    },

    /// A uniqueness constraint rejected the write.
    #[error("duplicate {entity} {field}")]
    Duplicate {
        /// Kind of record being written.
        entity: &'static str,
        /// Field whose value already exists.
        field: &'static str,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StorageError {
    /// Builds a [`StorageError::NotFound`] for the given record.
    #[must_use]
    pub const fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    /// Builds a [`StorageError::Duplicate`] for the given field.
    #[must_use]
    pub const fn duplicate(entity: &'static str, field: &'static str) -> Self {
        Self::Duplicate { entity, field }
    }

    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Optional criteria for narrowing a task listing.
///
/// An empty filter matches every task in the list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Keep only tasks in this status.
    pub status: Option<TaskStatus>,
    /// Keep only tasks at this priority.
    pub priority: Option<TaskPriority>,
}

impl TaskFilter {
    /// Returns `true` when the task satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|status| task.status() == status)
            && self.priority.is_none_or(|priority| task.priority() == priority)
    }
}

/// User account persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user account.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Duplicate`] when the email or username is
    /// already taken.
    async fn create(&self, user: &User) -> StorageResult<()>;

    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_by_id(&self, id: UserId) -> StorageResult<Option<User>>;

    /// Finds a user by email address.
    ///
    /// Returns `None` when no account uses the address.
    async fn find_by_email(&self, email: &str) -> StorageResult<Option<User>>;

    /// Finds a user by username.
    ///
    /// Returns `None` when no account uses the name.
    async fn find_by_username(&self, username: &str) -> StorageResult<Option<User>>;

    /// Persists changes to an existing user account.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] when the user does not exist.
    async fn update(&self, user: &User) -> StorageResult<()>;

    /// Deletes a user account.
    ///
    /// Owned task lists and their tasks are removed with the account, and
    /// task assignments pointing at it are cleared. Returns `false` when
    /// the user did not exist.
    async fn delete(&self, id: UserId) -> StorageResult<bool>;

    /// Returns every stored user account.
    async fn list_all(&self) -> StorageResult<Vec<User>>;
}

/// Task list persistence contract.
#[async_trait]
pub trait TaskListRepository: Send + Sync {
    /// Stores a new task list.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Duplicate`] when the list ID already exists.
    async fn create(&self, list: &TaskList) -> StorageResult<()>;

    /// Finds a task list by identifier.
    ///
    /// Returns `None` when the list does not exist.
    async fn find_by_id(&self, id: TaskListId) -> StorageResult<Option<TaskList>>;

    /// Returns every task list owned by the given user.
    async fn find_by_owner(&self, owner_id: UserId) -> StorageResult<Vec<TaskList>>;

    /// Persists changes to an existing task list.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] when the list does not exist.
    async fn update(&self, list: &TaskList) -> StorageResult<()>;

    /// Deletes a task list together with the tasks it contains.
    ///
    /// Returns `false` when the list did not exist.
    async fn delete(&self, id: TaskListId) -> StorageResult<bool>;

    /// Returns every stored task list.
    async fn list_all(&self) -> StorageResult<Vec<TaskList>>;
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Duplicate`] when the task ID already exists.
    async fn create(&self, task: &Task) -> StorageResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> StorageResult<Option<Task>>;

    /// Returns the tasks in a list that satisfy the filter.
    async fn find_by_list(
        &self,
        list_id: TaskListId,
        filter: &TaskFilter,
    ) -> StorageResult<Vec<Task>>;

    /// Returns every task assigned to the given user.
    async fn find_by_assignee(&self, user_id: UserId) -> StorageResult<Vec<Task>>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> StorageResult<()>;

    /// Deletes a task.
    ///
    /// Returns `false` when the task did not exist.
    async fn delete(&self, id: TaskId) -> StorageResult<bool>;

    /// Counts the tasks in a list that are in the given status.
    async fn count_by_list_and_status(
        &self,
        list_id: TaskListId,
        status: TaskStatus,
    ) -> StorageResult<u64>;
}
