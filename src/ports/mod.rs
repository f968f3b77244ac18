//! Port contracts required by the application services.
//!
//! Ports define infrastructure-agnostic interfaces. Adapters implement them
//! to connect the services to databases, credential backends, and delivery
//! channels.

pub mod notifier;
pub mod repository;
pub mod security;

pub use notifier::{Notifier, NotifyError};
pub use repository::{
    StorageError, StorageResult, TaskFilter, TaskListRepository, TaskRepository, UserRepository,
};
pub use security::{PasswordHashError, PasswordHasher, TokenClaims, TokenError, TokenIssuer};
