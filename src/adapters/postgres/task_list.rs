//! `PostgreSQL` task list repository.

use super::{
    PgPool,
    models::{NewTaskListRow, TaskListRow},
    run_blocking,
    schema::task_lists,
};
use crate::domain::{PersistedTaskListData, TaskList, TaskListId, UserId};
use crate::ports::{StorageError, StorageResult, TaskListRepository};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed task list repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskListRepository {
    pool: PgPool,
}

impl PostgresTaskListRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskListRepository for PostgresTaskListRepository {
    async fn create(&self, list: &TaskList) -> StorageResult<()> {
        let new_row = to_new_row(list);
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(task_lists::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        StorageError::duplicate("task list", "id")
                    }
                    _ => StorageError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskListId) -> StorageResult<Option<TaskList>> {
        run_blocking(&self.pool, move |connection| {
            let row = task_lists::table
                .filter(task_lists::id.eq(id.into_inner()))
                .select(TaskListRow::as_select())
                .first::<TaskListRow>(connection)
                .optional()
                .map_err(StorageError::persistence)?;
            Ok(row.map(row_to_list))
        })
        .await
    }

    async fn find_by_owner(&self, owner_id: UserId) -> StorageResult<Vec<TaskList>> {
        run_blocking(&self.pool, move |connection| {
            let rows = task_lists::table
                .filter(task_lists::owner_id.eq(owner_id.into_inner()))
                .order(task_lists::created_at.asc())
                .select(TaskListRow::as_select())
                .load::<TaskListRow>(connection)
                .map_err(StorageError::persistence)?;
            Ok(rows.into_iter().map(row_to_list).collect())
        })
        .await
    }

    async fn update(&self, list: &TaskList) -> StorageResult<()> {
        let id = list.id();
        let title = list.title().to_owned();
        let description = list.description().map(str::to_owned);
        let updated_at = list.updated_at();
        run_blocking(&self.pool, move |connection| {
            let updated =
                diesel::update(task_lists::table.filter(task_lists::id.eq(id.into_inner())))
                    .set((
                        task_lists::title.eq(&title),
                        task_lists::description.eq(description),
                        task_lists::updated_at.eq(updated_at),
                    ))
                    .execute(connection)
                    .map_err(StorageError::persistence)?;
            if updated == 0 {
                return Err(StorageError::not_found("task list", id.into_inner()));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskListId) -> StorageResult<bool> {
        run_blocking(&self.pool, move |connection| {
            let deleted =
                diesel::delete(task_lists::table.filter(task_lists::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(StorageError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn list_all(&self) -> StorageResult<Vec<TaskList>> {
        run_blocking(&self.pool, move |connection| {
            let rows = task_lists::table
                .order(task_lists::created_at.asc())
                .select(TaskListRow::as_select())
                .load::<TaskListRow>(connection)
                .map_err(StorageError::persistence)?;
            Ok(rows.into_iter().map(row_to_list).collect())
        })
        .await
    }
}

fn to_new_row(list: &TaskList) -> NewTaskListRow {
    NewTaskListRow {
        id: list.id().into_inner(),
        title: list.title().to_owned(),
        description: list.description().map(str::to_owned),
        owner_id: list.owner_id().into_inner(),
        created_at: list.created_at(),
        updated_at: list.updated_at(),
    }
}

fn row_to_list(row: TaskListRow) -> TaskList {
    let TaskListRow {
        id,
        title,
        description,
        owner_id,
        created_at,
        updated_at,
    } = row;

    TaskList::from_persisted(PersistedTaskListData {
        id: TaskListId::from_uuid(id),
        title,
        description,
        owner_id: UserId::from_uuid(owner_id),
        created_at,
        updated_at,
    })
}
