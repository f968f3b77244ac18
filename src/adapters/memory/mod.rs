//! In-memory adapter implementations for testing.
//!
//! These adapters provide simple, thread-safe implementations suitable for
//! unit testing without database dependencies. Build all three repositories
//! from one [`MemoryStore`] so they share state the way tables in a single
//! database would.

mod store;
mod task;
mod task_list;
mod user;

pub use store::MemoryStore;
pub use task::InMemoryTaskRepository;
pub use task_list::InMemoryTaskListRepository;
pub use user::InMemoryUserRepository;
