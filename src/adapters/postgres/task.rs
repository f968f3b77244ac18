//! `PostgreSQL` task repository.

use super::{
    PgPool,
    models::{NewTaskRow, TaskRow},
    run_blocking,
    schema::tasks,
};
use crate::domain::{
    PersistedTaskData, Task, TaskId, TaskListId, TaskPriority, TaskStatus, UserId,
};
use crate::ports::{StorageError, StorageResult, TaskFilter, TaskRepository};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(&self, task: &Task) -> StorageResult<()> {
        let new_row = to_new_row(task);
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        StorageError::duplicate("task", "id")
                    }
                    _ => StorageError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> StorageResult<Option<Task>> {
        run_blocking(&self.pool, move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(StorageError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_list(
        &self,
        list_id: TaskListId,
        filter: &TaskFilter,
    ) -> StorageResult<Vec<Task>> {
        let criteria = *filter;
        run_blocking(&self.pool, move |connection| {
            let mut query = tasks::table
                .filter(tasks::task_list_id.eq(list_id.into_inner()))
                .select(TaskRow::as_select())
                .into_boxed();
            if let Some(status) = criteria.status {
                query = query.filter(tasks::status.eq(status.as_str()));
            }
            if let Some(priority) = criteria.priority {
                query = query.filter(tasks::priority.eq(priority.as_str()));
            }
            let rows = query
                .order(tasks::created_at.asc())
                .load::<TaskRow>(connection)
                .map_err(StorageError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_by_assignee(&self, user_id: UserId) -> StorageResult<Vec<Task>> {
        run_blocking(&self.pool, move |connection| {
            let rows = tasks::table
                .filter(tasks::assigned_to.eq(user_id.into_inner()))
                .order(tasks::created_at.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(StorageError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn update(&self, task: &Task) -> StorageResult<()> {
        let id = task.id();
        let title = task.title().to_owned();
        let description = task.description().map(str::to_owned);
        let status = task.status().as_str().to_owned();
        let priority = task.priority().as_str().to_owned();
        let due_date = task.due_date();
        let assigned_to = task.assigned_to().map(UserId::into_inner);
        let completed_at = task.completed_at();
        let updated_at = task.updated_at();
        run_blocking(&self.pool, move |connection| {
            let updated = diesel::update(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .set((
                    tasks::title.eq(&title),
                    tasks::description.eq(description),
                    tasks::status.eq(&status),
                    tasks::priority.eq(&priority),
                    tasks::due_date.eq(due_date),
                    tasks::assigned_to.eq(assigned_to),
                    tasks::completed_at.eq(completed_at),
                    tasks::updated_at.eq(updated_at),
                ))
                .execute(connection)
                .map_err(StorageError::persistence)?;
            if updated == 0 {
                return Err(StorageError::not_found("task", id.into_inner()));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> StorageResult<bool> {
        run_blocking(&self.pool, move |connection| {
            let deleted = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(StorageError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn count_by_list_and_status(
        &self,
        list_id: TaskListId,
        status: TaskStatus,
    ) -> StorageResult<u64> {
        run_blocking(&self.pool, move |connection| {
            let count: i64 = tasks::table
                .filter(tasks::task_list_id.eq(list_id.into_inner()))
                .filter(tasks::status.eq(status.as_str()))
                .count()
                .get_result(connection)
                .map_err(StorageError::persistence)?;
            u64::try_from(count).map_err(StorageError::persistence)
        })
        .await
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        task_list_id: task.list_id().into_inner(),
        assigned_to: task.assigned_to().map(UserId::into_inner),
        due_date: task.due_date(),
        completed_at: task.completed_at(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> StorageResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        status: persisted_status,
        priority: persisted_priority,
        task_list_id,
        assigned_to,
        due_date,
        completed_at,
        created_at,
        updated_at,
    } = row;

    let status =
        TaskStatus::try_from(persisted_status.as_str()).map_err(StorageError::persistence)?;
    let priority =
        TaskPriority::try_from(persisted_priority.as_str()).map_err(StorageError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        list_id: TaskListId::from_uuid(task_list_id),
        title,
        description,
        status,
        priority,
        due_date,
        assigned_to: assigned_to.map(UserId::from_uuid),
        completed_at,
        created_at,
        updated_at,
    }))
}
