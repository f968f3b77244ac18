//! Unit tests for the task management crate.
//!
//! Tests are organised by layer, covering happy paths, error cases, and
//! edge cases for all public APIs.
