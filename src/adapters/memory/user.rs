//! In-memory user repository.

use async_trait::async_trait;

use super::store::MemoryStore;
use crate::domain::{User, UserId};
use crate::ports::{StorageError, StorageResult, UserRepository};

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    store: MemoryStore,
}

impl InMemoryUserRepository {
    /// Creates a repository over the given store.
    #[must_use]
    pub const fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> StorageResult<()> {
        let mut state = self.store.write()?;
        if state.users.contains_key(&user.id()) {
            return Err(StorageError::duplicate("user", "id"));
        }
        if state.users.values().any(|u| u.email() == user.email()) {
            return Err(StorageError::duplicate("user", "email"));
        }
        if state.users.values().any(|u| u.username() == user.username()) {
            return Err(StorageError::duplicate("user", "username"));
        }
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> StorageResult<Option<User>> {
        let state = self.store.read()?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let state = self.store.read()?;
        Ok(state.users.values().find(|u| u.email() == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        let state = self.store.read()?;
        Ok(state
            .users
            .values()
            .find(|u| u.username() == username)
            .cloned())
    }

    async fn update(&self, user: &User) -> StorageResult<()> {
        let mut state = self.store.write()?;
        if !state.users.contains_key(&user.id()) {
            return Err(StorageError::not_found("user", user.id().into_inner()));
        }
        if state
            .users
            .values()
            .any(|u| u.id() != user.id() && u.email() == user.email())
        {
            return Err(StorageError::duplicate("user", "email"));
        }
        if state
            .users
            .values()
            .any(|u| u.id() != user.id() && u.username() == user.username())
        {
            return Err(StorageError::duplicate("user", "username"));
        }
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn delete(&self, id: UserId) -> StorageResult<bool> {
        let mut state = self.store.write()?;
        Ok(state.remove_user_cascade(id))
    }

    async fn list_all(&self) -> StorageResult<Vec<User>> {
        let state = self.store.read()?;
        let mut users: Vec<User> = state.users.values().cloned().collect();
        users.sort_by_key(User::created_at);
        Ok(users)
    }
}
