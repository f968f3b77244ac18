//! `PostgreSQL` user repository.

use super::{
    PgPool, is_constraint,
    models::{NewUserRow, UserRow},
    run_blocking,
    schema::users,
};
use crate::domain::{PersistedUserData, User, UserId};
use crate::ports::{StorageError, StorageResult, UserRepository};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &User) -> StorageResult<()> {
        let new_row = to_new_row(user);
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(map_unique_violation)?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> StorageResult<Option<User>> {
        run_blocking(&self.pool, move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(StorageError::persistence)?;
            Ok(row.map(row_to_user))
        })
        .await
    }

    async fn find_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let lookup_email = email.to_owned();
        run_blocking(&self.pool, move |connection| {
            let row = users::table
                .filter(users::email.eq(&lookup_email))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(StorageError::persistence)?;
            Ok(row.map(row_to_user))
        })
        .await
    }

    async fn find_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        let lookup_username = username.to_owned();
        run_blocking(&self.pool, move |connection| {
            let row = users::table
                .filter(users::username.eq(&lookup_username))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(StorageError::persistence)?;
            Ok(row.map(row_to_user))
        })
        .await
    }

    async fn update(&self, user: &User) -> StorageResult<()> {
        let id = user.id();
        let email = user.email().to_owned();
        let username = user.username().to_owned();
        let full_name = user.full_name().to_owned();
        let password_hash = user.password_hash().to_owned();
        let is_active = user.is_active();
        let updated_at = user.updated_at();
        run_blocking(&self.pool, move |connection| {
            let updated = diesel::update(users::table.filter(users::id.eq(id.into_inner())))
                .set((
                    users::email.eq(&email),
                    users::username.eq(&username),
                    users::full_name.eq(&full_name),
                    users::password_hash.eq(&password_hash),
                    users::is_active.eq(is_active),
                    users::updated_at.eq(updated_at),
                ))
                .execute(connection)
                .map_err(map_unique_violation)?;
            if updated == 0 {
                return Err(StorageError::not_found("user", id.into_inner()));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: UserId) -> StorageResult<bool> {
        run_blocking(&self.pool, move |connection| {
            let deleted = diesel::delete(users::table.filter(users::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(StorageError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn list_all(&self) -> StorageResult<Vec<User>> {
        run_blocking(&self.pool, move |connection| {
            let rows = users::table
                .order(users::created_at.asc())
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(StorageError::persistence)?;
            Ok(rows.into_iter().map(row_to_user).collect())
        })
        .await
    }
}

fn to_new_row(user: &User) -> NewUserRow {
    NewUserRow {
        id: user.id().into_inner(),
        email: user.email().to_owned(),
        username: user.username().to_owned(),
        full_name: user.full_name().to_owned(),
        password_hash: user.password_hash().to_owned(),
        is_active: user.is_active(),
        created_at: user.created_at(),
        updated_at: user.updated_at(),
    }
}

fn row_to_user(row: UserRow) -> User {
    let UserRow {
        id,
        email,
        username,
        full_name,
        password_hash,
        is_active,
        created_at,
        updated_at,
    } = row;

    User::from_persisted(PersistedUserData {
        id: UserId::from_uuid(id),
        email,
        username,
        full_name,
        password_hash,
        is_active,
        created_at,
        updated_at,
    })
}

fn map_unique_violation(err: DieselError) -> StorageError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
            if is_constraint(info.as_ref(), "users_email_key") =>
        {
            StorageError::duplicate("user", "email")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
            if is_constraint(info.as_ref(), "users_username_key") =>
        {
            StorageError::duplicate("user", "username")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            StorageError::duplicate("user", "id")
        }
        _ => StorageError::persistence(err),
    }
}
