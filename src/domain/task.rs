//! Task aggregate root and its status and priority vocabularies.

use super::{DomainError, ParseTaskPriorityError, ParseTaskStatusError, TaskId, TaskListId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

const TITLE_MAX: usize = 200;
const DESCRIPTION_MAX: usize = 2000;

/// Task workflow status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not started.
    #[default]
    Pending,
    /// Work is underway.
    InProgress,
    /// Work is finished.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task urgency level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Ordinary urgency.
    #[default]
    Medium,
    /// Needs prompt attention.
    High,
    /// Drop everything else.
    Urgent,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

/// Task aggregate root.
///
/// Every task belongs to exactly one list and may be assigned to at most one
/// user. The `completed_at` timestamp tracks the status field: it is set
/// whenever the task enters [`TaskStatus::Completed`] and cleared whenever
/// the task leaves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    list_id: TaskListId,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<DateTime<Utc>>,
    assigned_to: Option<UserId>,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

/// Parameter object for creating a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Parent list identifier.
    pub list_id: TaskListId,
    /// Task title.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Urgency level.
    pub priority: TaskPriority,
    /// Optional initial assignee.
    pub assigned_to: Option<UserId>,
    /// Optional deadline.
    pub due_date: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted parent list identifier.
    pub list_id: TaskListId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted workflow status.
    pub status: TaskStatus,
    /// Persisted urgency level.
    pub priority: TaskPriority,
    /// Persisted deadline, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted assignee identifier, if any.
    pub assigned_to: Option<UserId>,
    /// Persisted completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp, if any.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new pending task.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyTitle`] when the title is empty,
    /// [`DomainError::TitleTooLong`] when it exceeds 200 characters, or
    /// [`DomainError::DescriptionTooLong`] when the description exceeds
    /// 2000 characters.
    pub fn new(data: NewTask, clock: &impl Clock) -> Result<Self, DomainError> {
        validate_title(&data.title)?;
        validate_description(data.description.as_deref())?;

        Ok(Self {
            id: TaskId::new(),
            list_id: data.list_id,
            title: data.title,
            description: data.description,
            status: TaskStatus::Pending,
            priority: data.priority,
            due_date: data.due_date,
            assigned_to: data.assigned_to,
            completed_at: None,
            created_at: clock.utc(),
            updated_at: None,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            list_id: data.list_id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            due_date: data.due_date,
            assigned_to: data.assigned_to,
            completed_at: data.completed_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the parent list identifier.
    #[must_use]
    pub const fn list_id(&self) -> TaskListId {
        self.list_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the urgency level.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the assignee identifier, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<UserId> {
        self.assigned_to
    }

    /// Returns the completion timestamp, if any.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp, if any.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns `true` when the task is in [`TaskStatus::Completed`].
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Returns `true` when the deadline has passed and the task is not
    /// completed.
    #[must_use]
    pub fn is_overdue(&self, clock: &impl Clock) -> bool {
        !self.is_completed() && self.due_date.is_some_and(|due| clock.utc() > due)
    }

    /// Moves the task to a new workflow status.
    ///
    /// Entering [`TaskStatus::Completed`] stamps `completed_at` with the
    /// current clock time; leaving it clears the stamp. Repeating the
    /// completed status keeps the original stamp. Status and stamp change
    /// together in the same call.
    pub fn change_status(&mut self, new_status: TaskStatus, clock: &impl Clock) {
        let was_completed = self.is_completed();
        let now_completed = new_status == TaskStatus::Completed;
        self.status = new_status;
        if now_completed && !was_completed {
            self.completed_at = Some(clock.utc());
        } else if was_completed && !now_completed {
            self.completed_at = None;
        }
        self.touch(clock);
    }

    /// Changes the urgency level.
    pub fn change_priority(&mut self, new_priority: TaskPriority, clock: &impl Clock) {
        self.priority = new_priority;
        self.touch(clock);
    }

    /// Assigns the task to a user, replacing any current assignee.
    pub fn assign_to(&mut self, user_id: UserId, clock: &impl Clock) {
        self.assigned_to = Some(user_id);
        self.touch(clock);
    }

    /// Removes the current assignee, if any.
    pub fn unassign(&mut self, clock: &impl Clock) {
        self.assigned_to = None;
        self.touch(clock);
    }

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyTitle`] when the new title is empty or
    /// [`DomainError::TitleTooLong`] when it exceeds 200 characters. The
    /// current title is untouched on failure.
    pub fn rename(
        &mut self,
        new_title: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), DomainError> {
        let title = new_title.into();
        validate_title(&title)?;
        self.title = title;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the description.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DescriptionTooLong`] when the new description
    /// exceeds 2000 characters.
    pub fn edit_description(
        &mut self,
        new_description: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), DomainError> {
        validate_description(new_description.as_deref())?;
        self.description = new_description;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the deadline.
    pub fn set_due_date(&mut self, due_date: Option<DateTime<Utc>>, clock: &impl Clock) {
        self.due_date = due_date;
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = Some(clock.utc());
    }
}

/// Enforces the non-empty and length rules on a task title.
///
/// Task titles are stored as given, including surrounding whitespace.
fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.is_empty() {
        return Err(DomainError::EmptyTitle);
    }
    let len = title.chars().count();
    if len > TITLE_MAX {
        return Err(DomainError::TitleTooLong(len));
    }
    Ok(())
}

fn validate_description(description: Option<&str>) -> Result<(), DomainError> {
    if let Some(text) = description {
        let len = text.chars().count();
        if len > DESCRIPTION_MAX {
            return Err(DomainError::DescriptionTooLong {
                length: len,
                max: DESCRIPTION_MAX,
            });
        }
    }
    Ok(())
}
