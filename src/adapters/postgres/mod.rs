//! `PostgreSQL` adapters for task management persistence.
//!
//! Repositories share one connection pool and run Diesel queries on the
//! blocking thread pool. Referential actions live in the schema: deleting
//! a user cascades to their lists, deleting a list cascades to its tasks,
//! and deleting an assignee clears the assignment column.

mod models;
mod schema;
mod task;
mod task_list;
mod user;

pub use task::PostgresTaskRepository;
pub use task_list::PostgresTaskListRepository;
pub use user::PostgresUserRepository;

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::DatabaseErrorInformation;

use crate::ports::{StorageError, StorageResult};

/// `PostgreSQL` connection pool type shared by the repositories.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for the given database URL.
///
/// # Errors
///
/// Returns [`StorageError::Persistence`] when the pool cannot be built.
pub fn build_pool(database_url: &str) -> StorageResult<PgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .build(manager)
        .map_err(StorageError::persistence)
}

/// Runs a Diesel closure on the blocking thread pool.
async fn run_blocking<F, T>(pool: &PgPool, f: F) -> StorageResult<T>
where
    F: FnOnce(&mut PgConnection) -> StorageResult<T> + Send + 'static,
    T: Send + 'static,
{
    let pool_handle = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool_handle.get().map_err(StorageError::persistence)?;
        f(&mut connection)
    })
    .await
    .map_err(StorageError::persistence)?
}

/// Returns `true` when the database error names the given constraint.
fn is_constraint(info: &dyn DatabaseErrorInformation, name: &str) -> bool {
    info.constraint_name().is_some_and(|n| n == name)
}
