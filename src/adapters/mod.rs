//! Infrastructure adapters for the application ports.
//!
//! This module provides concrete implementations of the port contracts,
//! following hexagonal architecture principles. Adapters handle all
//! infrastructure concerns while the domain remains pure.
//!
//! # Available Adapters
//!
//! - [`memory`]: Thread-safe in-memory repositories sharing one store, for
//!   unit testing
//! - [`postgres`]: Production `PostgreSQL` persistence using Diesel
//! - [`security`]: Bcrypt password hashing and JWT access tokens
//! - [`email`]: Log-backed notification delivery

pub mod email;
pub mod memory;
pub mod postgres;
pub mod security;
