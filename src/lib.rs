//! Taskdeck: a task management backend.
//!
//! This crate provides the core functionality for a multi-user task
//! manager: account registration and token-based authentication, task
//! lists scoped to their owner, and tasks with status, priority,
//! assignment, and deadline tracking.
//!
//! # Architecture
//!
//! Taskdeck follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, security,
//!   email)
//!
//! # Modules
//!
//! - [`domain`]: User, task list, and task entities with their invariants
//! - [`ports`]: Repository, security, and notification contracts
//! - [`adapters`]: In-memory and PostgreSQL storage, bcrypt and JWT
//!   security, SMTP-style notification logging
//! - [`services`]: Authentication, task list, and task orchestration
//! - [`config`]: Environment-backed application configuration

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
