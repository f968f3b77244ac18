//! Application services orchestrating domain operations over the ports.
//!
//! Services own the authorization rules, drive the domain entities, and
//! collapse domain, storage, and security failures into the [`AppError`]
//! taxonomy so callers handle one error vocabulary.

mod auth;
mod error;
mod task;
mod task_list;

pub use auth::{AccessToken, AuthService, LoginRequest, RegisterRequest, UserProfile};
pub use error::{AppError, AppResult, ErrorKind};
pub use task::{CreateTaskRequest, TaskDetails, TaskService, UpdateTaskRequest};
pub use task_list::{
    CreateTaskListRequest, TaskListOverview, TaskListService, UpdateTaskListRequest,
};
