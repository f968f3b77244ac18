//! Task list aggregate: a titled collection of tasks with a single owner.

use super::{DomainError, TaskListId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;

const TITLE_MAX: usize = 200;
const DESCRIPTION_MAX: usize = 1000;

/// Titled task collection owned by exactly one user.
///
/// The owner is fixed at creation. The title invariant holds for the whole
/// lifetime: it is stored trimmed and is never empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskList {
    id: TaskListId,
    title: String,
    description: Option<String>,
    owner_id: UserId,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskListData {
    /// Persisted list identifier.
    pub id: TaskListId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted owner identifier.
    pub owner_id: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp, if any.
    pub updated_at: Option<DateTime<Utc>>,
}

impl TaskList {
    /// Creates a new task list owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyTitle`] when the title trims to nothing,
    /// [`DomainError::TitleTooLong`] when it exceeds 200 characters, or
    /// [`DomainError::DescriptionTooLong`] when the description exceeds
    /// 1000 characters.
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        owner_id: UserId,
        clock: &impl Clock,
    ) -> Result<Self, DomainError> {
        let stored_title = validate_title(&title.into())?;
        validate_description(description.as_deref())?;

        Ok(Self {
            id: TaskListId::new(),
            title: stored_title,
            description,
            owner_id,
            created_at: clock.utc(),
            updated_at: None,
        })
    }

    /// Reconstructs a task list from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskListData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            owner_id: data.owner_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the list identifier.
    #[must_use]
    pub const fn id(&self) -> TaskListId {
        self.id
    }

    /// Returns the trimmed title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the owner identifier.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
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

    /// Replaces the title, storing it trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyTitle`] when the new title trims to
    /// nothing or [`DomainError::TitleTooLong`] when it exceeds 200
    /// characters. The current title is untouched on failure.
    pub fn rename(
        &mut self,
        new_title: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), DomainError> {
        self.title = validate_title(&new_title.into())?;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the description.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DescriptionTooLong`] when the new description
    /// exceeds 1000 characters.
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

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = Some(clock.utc());
    }
}

/// Trims the title and enforces the non-empty and length rules.
fn validate_title(raw: &str) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyTitle);
    }
    let len = trimmed.chars().count();
    if len > TITLE_MAX {
        return Err(DomainError::TitleTooLong(len));
    }
    Ok(trimmed.to_owned())
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
