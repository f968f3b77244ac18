//! Task service for task management, status flow, and assignment notices.

use crate::{
    domain::{NewTask, Task, TaskId, TaskList, TaskListId, TaskPriority, TaskStatus, UserId},
    ports::{
        Notifier, NotifyError, TaskFilter, TaskListRepository, TaskRepository, UserRepository,
    },
    services::{AppError, AppResult},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::{future::Future, sync::Arc, time::Duration};
use tokio::time::timeout;
use tracing::warn;

/// Ceiling on how long a notification delivery may block its operation.
const NOTIFY_TIMEOUT: Duration = Duration::from_secs(2);

/// Payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTaskRequest {
    /// Task title.
    pub title: String,
    /// Optional free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Urgency level, defaulting to medium.
    #[serde(default)]
    pub priority: TaskPriority,
    /// Optional initial assignee.
    #[serde(default)]
    pub assigned_to: Option<UserId>,
    /// Optional deadline.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

/// Partial update for a task.
///
/// Absent fields keep their stored value. The assignee can only be
/// replaced here, never cleared; [`TaskService::unassign`] clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateTaskRequest {
    /// Replacement title.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement description.
    #[serde(default)]
    pub description: Option<String>,
    /// Replacement urgency level.
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    /// Replacement assignee.
    #[serde(default)]
    pub assigned_to: Option<UserId>,
    /// Replacement deadline.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

/// View of a task including derived scheduling state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskDetails {
    /// Task identifier.
    pub id: TaskId,
    /// Identifier of the containing list.
    pub list_id: TaskListId,
    /// Task title.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Workflow state.
    pub status: TaskStatus,
    /// Urgency level.
    pub priority: TaskPriority,
    /// Identifier of the assigned user, if any.
    pub assigned_to: Option<UserId>,
    /// Optional deadline.
    pub due_date: Option<DateTime<Utc>>,
    /// Whether the deadline has passed without the task completing.
    pub is_overdue: bool,
    /// When the task entered the completed status, while it stays there.
    pub completed_at: Option<DateTime<Utc>>,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
    /// When the task was last modified, if ever.
    pub updated_at: Option<DateTime<Utc>>,
}

impl TaskDetails {
    /// Builds the caller-facing view of a task.
    ///
    /// `is_overdue` is evaluated against the supplied clock.
    #[must_use]
    pub fn from_task(task: &Task, clock: &impl Clock) -> Self {
        Self {
            id: task.id(),
            list_id: task.list_id(),
            title: task.title().to_owned(),
            description: task.description().map(ToOwned::to_owned),
            status: task.status(),
            priority: task.priority(),
            assigned_to: task.assigned_to(),
            due_date: task.due_date(),
            is_overdue: task.is_overdue(clock),
            completed_at: task.completed_at(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

/// Recipient and titles for a task-assigned notice.
struct AssignmentNotice {
    recipient: String,
    task_title: String,
    list_title: String,
}

/// Task management scoped to the owner of the containing list.
///
/// Status changes are additionally open to the task's assignee. Outbound
/// notices are best effort: a slow or failing channel is logged and never
/// fails the operation that triggered it.
#[derive(Clone)]
pub struct TaskService<T, L, U, N, C>
where
    T: TaskRepository,
    L: TaskListRepository,
    U: UserRepository,
    N: Notifier,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    lists: Arc<L>,
    users: Arc<U>,
    notifier: Arc<N>,
    clock: Arc<C>,
}

impl<T, L, U, N, C> TaskService<T, L, U, N, C>
where
    T: TaskRepository,
    L: TaskListRepository,
    U: UserRepository,
    N: Notifier,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(
        tasks: Arc<T>,
        lists: Arc<L>,
        users: Arc<U>,
        notifier: Arc<N>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            lists,
            users,
            notifier,
            clock,
        }
    }

    /// Creates a task in a list the actor owns.
    ///
    /// When the payload names an assignee, the task starts assigned and a
    /// task-assigned notice is attempted after the task is stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the list or the named assignee
    /// does not exist, [`AppError::Authorization`] when the actor is not
    /// the list owner, or [`AppError::Validation`] when a field is
    /// rejected.
    pub async fn create(
        &self,
        list_id: TaskListId,
        actor: UserId,
        request: CreateTaskRequest,
    ) -> AppResult<TaskDetails> {
        let list = self
            .lists
            .find_by_id(list_id)
            .await?
            .ok_or_else(|| AppError::not_found("task list"))?;
        if list.owner_id() != actor {
            return Err(AppError::authorization(
                "not allowed to create tasks in this list",
            ));
        }
        if let Some(assignee) = request.assigned_to {
            self.ensure_user_exists(assignee).await?;
        }

        let task = Task::new(
            NewTask {
                list_id,
                title: request.title,
                description: request.description,
                priority: request.priority,
                assigned_to: request.assigned_to,
                due_date: request.due_date,
            },
            self.clock.as_ref(),
        )?;
        self.tasks.create(&task).await?;

        if task.assigned_to().is_some() {
            self.notify_assignment(task.id()).await;
        }

        Ok(self.details(&task))
    }

    /// Fetches a task from a list the requester owns.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the task does not exist or
    /// [`AppError::Authorization`] when the requester does not own the
    /// containing list.
    pub async fn get(&self, task_id: TaskId, requester: UserId) -> AppResult<TaskDetails> {
        let task = self.fetch_task(task_id).await?;
        self.verify_owner_access(&task, requester).await?;
        Ok(self.details(&task))
    }

    /// Returns the tasks in a list the requester owns, narrowed by the
    /// filter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the list does not exist or
    /// [`AppError::Authorization`] when the requester is not its owner.
    pub async fn list_by_list(
        &self,
        list_id: TaskListId,
        requester: UserId,
        filter: TaskFilter,
    ) -> AppResult<Vec<TaskDetails>> {
        let list = self
            .lists
            .find_by_id(list_id)
            .await?
            .ok_or_else(|| AppError::not_found("task list"))?;
        if list.owner_id() != requester {
            return Err(AppError::authorization(
                "not allowed to view the tasks in this list",
            ));
        }
        let tasks = self.tasks.find_by_list(list_id, &filter).await?;
        Ok(tasks.iter().map(|task| self.details(task)).collect())
    }

    /// Returns every task assigned to the given user.
    ///
    /// Callers list their own assignments, so no ownership check applies.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when storage fails.
    pub async fn list_assigned_to(&self, user_id: UserId) -> AppResult<Vec<TaskDetails>> {
        let tasks = self.tasks.find_by_assignee(user_id).await?;
        Ok(tasks.iter().map(|task| self.details(task)).collect())
    }

    /// Applies a partial update to a task in a list the actor owns.
    ///
    /// A replacement assignee is only applied, and only announced, when it
    /// differs from the current one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the task or a named assignee
    /// does not exist, [`AppError::Authorization`] when the actor does not
    /// own the containing list, or [`AppError::Validation`] when a
    /// replacement field is rejected.
    pub async fn update(
        &self,
        task_id: TaskId,
        actor: UserId,
        request: UpdateTaskRequest,
    ) -> AppResult<TaskDetails> {
        let mut task = self.fetch_task(task_id).await?;
        self.verify_owner_access(&task, actor).await?;

        let previous_assignee = task.assigned_to();
        if let Some(assignee) = request.assigned_to {
            self.ensure_user_exists(assignee).await?;
        }
        let new_assignee = request
            .assigned_to
            .filter(|assignee| previous_assignee != Some(*assignee));

        if let Some(title) = request.title {
            task.rename(title, self.clock.as_ref())?;
        }
        if let Some(description) = request.description {
            task.edit_description(Some(description), self.clock.as_ref())?;
        }
        if let Some(priority) = request.priority {
            task.change_priority(priority, self.clock.as_ref());
        }
        if let Some(assignee) = new_assignee {
            task.assign_to(assignee, self.clock.as_ref());
        }
        if let Some(due_date) = request.due_date {
            task.set_due_date(Some(due_date), self.clock.as_ref());
        }
        self.tasks.update(&task).await?;

        if new_assignee.is_some() {
            self.notify_assignment(task_id).await;
        }

        Ok(self.details(&task))
    }

    /// Moves a task to a new workflow status.
    ///
    /// Open to the list owner and to the task's assignee. When someone
    /// other than the owner completes the task, the owner is sent a
    /// task-completed notice.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the task or its list does not
    /// exist, or [`AppError::Authorization`] when the actor is neither the
    /// list owner nor the assignee.
    pub async fn update_status(
        &self,
        task_id: TaskId,
        actor: UserId,
        new_status: TaskStatus,
    ) -> AppResult<TaskDetails> {
        let mut task = self.fetch_task(task_id).await?;
        let list = self.parent_list(&task).await?;
        if list.owner_id() != actor && task.assigned_to() != Some(actor) {
            return Err(AppError::authorization(
                "not allowed to change the status of this task",
            ));
        }

        let previous_status = task.status();
        task.change_status(new_status, self.clock.as_ref());
        self.tasks.update(&task).await?;

        let newly_completed =
            new_status == TaskStatus::Completed && previous_status != TaskStatus::Completed;
        if newly_completed && list.owner_id() != actor {
            self.notify_completion(list.owner_id(), task.title()).await;
        }

        Ok(self.details(&task))
    }

    /// Assigns a task to a user and announces the assignment.
    ///
    /// Unlike [`TaskService::update`], re-assigning the current assignee
    /// still stamps the task and re-sends the notice.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the task or assignee does not
    /// exist, or [`AppError::Authorization`] when the actor does not own
    /// the containing list.
    pub async fn assign(
        &self,
        task_id: TaskId,
        actor: UserId,
        assignee: UserId,
    ) -> AppResult<TaskDetails> {
        let mut task = self.fetch_task(task_id).await?;
        self.verify_owner_access(&task, actor).await?;
        self.ensure_user_exists(assignee).await?;

        task.assign_to(assignee, self.clock.as_ref());
        self.tasks.update(&task).await?;
        self.notify_assignment(task_id).await;

        Ok(self.details(&task))
    }

    /// Clears a task's assignee without notifying anyone.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the task does not exist or
    /// [`AppError::Authorization`] when the actor does not own the
    /// containing list.
    pub async fn unassign(&self, task_id: TaskId, actor: UserId) -> AppResult<TaskDetails> {
        let mut task = self.fetch_task(task_id).await?;
        self.verify_owner_access(&task, actor).await?;

        task.unassign(self.clock.as_ref());
        self.tasks.update(&task).await?;

        Ok(self.details(&task))
    }

    /// Deletes a task from a list the actor owns.
    ///
    /// Returns `false` when the task vanished between the ownership check
    /// and the delete.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the task does not exist or
    /// [`AppError::Authorization`] when the actor does not own the
    /// containing list.
    pub async fn delete(&self, task_id: TaskId, actor: UserId) -> AppResult<bool> {
        let task = self.fetch_task(task_id).await?;
        self.verify_owner_access(&task, actor).await?;
        Ok(self.tasks.delete(task_id).await?)
    }

    /// Fetches a task or reports it missing.
    async fn fetch_task(&self, task_id: TaskId) -> AppResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| AppError::not_found("task"))
    }

    /// Fetches the list a task belongs to.
    ///
    /// A dangling parent reference reports the list as missing rather
    /// than the task.
    async fn parent_list(&self, task: &Task) -> AppResult<TaskList> {
        self.lists
            .find_by_id(task.list_id())
            .await?
            .ok_or_else(|| AppError::not_found("task list"))
    }

    /// Checks the requester owns the list containing the task.
    ///
    /// Assignment alone does not grant access here; a status change is
    /// the one operation an assignee may perform.
    async fn verify_owner_access(&self, task: &Task, requester: UserId) -> AppResult<TaskList> {
        let list = self.parent_list(task).await?;
        if list.owner_id() != requester {
            return Err(AppError::authorization("not allowed to access this task"));
        }
        Ok(list)
    }

    /// Checks a prospective assignee exists.
    async fn ensure_user_exists(&self, user_id: UserId) -> AppResult<()> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AppError::not_found("user"));
        }
        Ok(())
    }

    /// Sends the task-assigned notice for a freshly stored assignment.
    ///
    /// State is re-read so the notice reflects what was persisted. A
    /// missing record, a delivery error, or a slow channel downgrades to
    /// a warning; the operation that triggered the notice has already
    /// succeeded.
    async fn notify_assignment(&self, task_id: TaskId) {
        match self.assignment_notice(task_id).await {
            Ok(Some(notice)) => {
                deliver(
                    self.notifier.task_assigned(
                        &notice.recipient,
                        &notice.task_title,
                        &notice.list_title,
                    ),
                    "task assigned",
                )
                .await;
            }
            Ok(None) => {}
            Err(error) => warn!(error = %error, "Task assignment notice skipped"),
        }
    }

    /// Gathers the recipient and titles for a task-assigned notice.
    ///
    /// Returns `None` when the task, its assignee, or its list is gone.
    async fn assignment_notice(&self, task_id: TaskId) -> AppResult<Option<AssignmentNotice>> {
        let Some(task) = self.tasks.find_by_id(task_id).await? else {
            return Ok(None);
        };
        let Some(assignee) = task.assigned_to() else {
            return Ok(None);
        };
        let Some(user) = self.users.find_by_id(assignee).await? else {
            return Ok(None);
        };
        let Some(list) = self.lists.find_by_id(task.list_id()).await? else {
            return Ok(None);
        };
        Ok(Some(AssignmentNotice {
            recipient: user.email().to_owned(),
            task_title: task.title().to_owned(),
            list_title: list.title().to_owned(),
        }))
    }

    /// Sends the task-completed notice to the list owner.
    async fn notify_completion(&self, owner_id: UserId, task_title: &str) {
        match self.users.find_by_id(owner_id).await {
            Ok(Some(owner)) => {
                deliver(
                    self.notifier.task_completed(owner.email(), task_title),
                    "task completed",
                )
                .await;
            }
            Ok(None) => {}
            Err(error) => warn!(error = %error, "Task completion notice skipped"),
        }
    }

    /// Builds the caller-facing view of a task.
    fn details(&self, task: &Task) -> TaskDetails {
        TaskDetails::from_task(task, self.clock.as_ref())
    }
}

/// Runs a notification delivery under the timeout, logging any failure.
async fn deliver<F>(send: F, notice: &'static str)
where
    F: Future<Output = Result<(), NotifyError>>,
{
    match timeout(NOTIFY_TIMEOUT, send).await {
        Ok(Ok(())) => {}
        Ok(Err(error)) => warn!(notice, error = %error, "Notification delivery failed"),
        Err(_) => warn!(notice, "Notification timed out"),
    }
}
