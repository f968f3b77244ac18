//! Domain model for collaborative task management.
//!
//! The domain models user accounts, owned task lists, and the tasks inside
//! them, including status and assignment bookkeeping, while keeping all
//! infrastructure concerns outside of the domain boundary.

mod error;
mod ids;
mod task;
mod task_list;
mod user;

pub use error::{DomainError, ParseTaskPriorityError, ParseTaskStatusError};
pub use ids::{TaskId, TaskListId, UserId};
pub use task::{NewTask, PersistedTaskData, Task, TaskPriority, TaskStatus};
pub use task_list::{PersistedTaskListData, TaskList};
pub use user::{NewUser, PersistedUserData, User};
