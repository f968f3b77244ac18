//! Task list service for list management and completion reporting.

use crate::{
    domain::{TaskList, TaskListId, TaskStatus, UserId},
    ports::{TaskFilter, TaskListRepository, TaskRepository},
    services::{AppError, AppResult},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Payload for creating a task list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTaskListRequest {
    /// List title, trimmed before storage.
    pub title: String,
    /// Optional free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update for a task list.
///
/// Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateTaskListRequest {
    /// Replacement title, trimmed before storage.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement description.
    #[serde(default)]
    pub description: Option<String>,
}

/// View of a task list together with its completion figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskListOverview {
    /// List identifier.
    pub id: TaskListId,
    /// List title.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Identifier of the owning user.
    pub owner_id: UserId,
    /// Share of the list's tasks that are completed, from 0.0 to 100.0.
    pub completion_percentage: f64,
    /// When the list was created.
    pub created_at: DateTime<Utc>,
    /// When the list was last modified, if ever.
    pub updated_at: Option<DateTime<Utc>>,
}

impl TaskListOverview {
    /// Builds the view for a list with a precomputed completion figure.
    #[must_use]
    pub fn from_list(list: &TaskList, completion_percentage: f64) -> Self {
        Self {
            id: list.id(),
            title: list.title().to_owned(),
            description: list.description().map(ToOwned::to_owned),
            owner_id: list.owner_id(),
            completion_percentage,
            created_at: list.created_at(),
            updated_at: list.updated_at(),
        }
    }
}

/// Task list management scoped to the owning user.
#[derive(Clone)]
pub struct TaskListService<L, T, C>
where
    L: TaskListRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    lists: Arc<L>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<L, T, C> TaskListService<L, T, C>
where
    L: TaskListRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task list service.
    #[must_use]
    pub const fn new(lists: Arc<L>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            lists,
            tasks,
            clock,
        }
    }

    /// Creates a task list owned by `owner_id`.
    ///
    /// A fresh list has no tasks, so its completion figure is 0.0.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the title or description is
    /// rejected, or [`AppError::Internal`] when storage fails.
    pub async fn create(
        &self,
        owner_id: UserId,
        request: CreateTaskListRequest,
    ) -> AppResult<TaskListOverview> {
        let list = TaskList::new(
            request.title,
            request.description,
            owner_id,
            self.clock.as_ref(),
        )?;
        self.lists.create(&list).await?;
        Ok(TaskListOverview::from_list(&list, 0.0))
    }

    /// Fetches a task list the requester owns.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the list does not exist or
    /// [`AppError::Authorization`] when the requester is not its owner.
    pub async fn get(
        &self,
        list_id: TaskListId,
        requester: UserId,
    ) -> AppResult<TaskListOverview> {
        let list = self.fetch_owned(list_id, requester, "view").await?;
        let completion = self.completion(list_id).await?;
        Ok(TaskListOverview::from_list(&list, completion))
    }

    /// Returns every task list owned by `owner_id`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when storage fails.
    pub async fn list_owned(&self, owner_id: UserId) -> AppResult<Vec<TaskListOverview>> {
        let lists = self.lists.find_by_owner(owner_id).await?;
        let mut overviews = Vec::with_capacity(lists.len());
        for list in &lists {
            let completion = self.completion(list.id()).await?;
            overviews.push(TaskListOverview::from_list(list, completion));
        }
        Ok(overviews)
    }

    /// Applies a partial update to a task list the requester owns.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the list does not exist,
    /// [`AppError::Authorization`] when the requester is not its owner, or
    /// [`AppError::Validation`] when a replacement field is rejected.
    pub async fn update(
        &self,
        list_id: TaskListId,
        requester: UserId,
        request: UpdateTaskListRequest,
    ) -> AppResult<TaskListOverview> {
        let mut list = self.fetch_owned(list_id, requester, "modify").await?;
        if let Some(title) = request.title {
            list.rename(title, self.clock.as_ref())?;
        }
        if let Some(description) = request.description {
            list.edit_description(Some(description), self.clock.as_ref())?;
        }
        self.lists.update(&list).await?;

        let completion = self.completion(list_id).await?;
        Ok(TaskListOverview::from_list(&list, completion))
    }

    /// Deletes a task list the requester owns, along with its tasks.
    ///
    /// Returns `false` when the list vanished between the ownership check
    /// and the delete.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the list does not exist or
    /// [`AppError::Authorization`] when the requester is not its owner.
    pub async fn delete(&self, list_id: TaskListId, requester: UserId) -> AppResult<bool> {
        self.fetch_owned(list_id, requester, "delete").await?;
        Ok(self.lists.delete(list_id).await?)
    }

    /// Computes the completed share of the list's tasks.
    ///
    /// A list with no tasks reports 0.0 rather than dividing by zero.
    async fn completion(&self, list_id: TaskListId) -> AppResult<f64> {
        let tasks = self
            .tasks
            .find_by_list(list_id, &TaskFilter::default())
            .await?;
        if tasks.is_empty() {
            return Ok(0.0);
        }
        let completed = self
            .tasks
            .count_by_list_and_status(list_id, TaskStatus::Completed)
            .await?;
        Ok(completion_percentage(completed, tasks.len()))
    }

    /// Fetches a list and checks the requester owns it.
    async fn fetch_owned(
        &self,
        list_id: TaskListId,
        requester: UserId,
        action: &str,
    ) -> AppResult<TaskList> {
        let list = self
            .lists
            .find_by_id(list_id)
            .await?
            .ok_or_else(|| AppError::not_found("task list"))?;
        if list.owner_id() != requester {
            return Err(AppError::authorization(format!(
                "not allowed to {action} this task list"
            )));
        }
        Ok(list)
    }
}

/// Rounds the completed share of `total` tasks to two decimal places.
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "completion is a reporting figure; two decimal places suffice"
)]
fn completion_percentage(completed: u64, total: usize) -> f64 {
    let percentage = completed as f64 * 100.0 / total as f64;
    (percentage * 100.0).round() / 100.0
}
