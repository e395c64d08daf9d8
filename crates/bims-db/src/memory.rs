use std::collections::HashMap;

use async_trait::async_trait;
use bims_auth::{StoreError, UserStore};
use bims_models::{NewUser, User, UserId};
use chrono::Utc;
use parking_lot::RwLock;

/// Process-local [`UserStore`]. Records live for the lifetime of the value.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<UserId, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let store = Self::new();
        for user in users {
            store.put(user);
        }
        store
    }

    /// Inserts or replaces a record as-is.
    pub fn put(&self, user: User) {
        self.users.write().insert(user.id, user);
    }

    pub fn remove(&self, id: UserId) -> Option<User> {
        self.users.write().remove(&id)
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let mut users: Vec<User> = self.users.read().values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write();

        if users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&new_user.email))
        {
            return Err(StoreError::Conflict);
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: new_user.email,
            role: new_user.role,
            password: new_user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());

        Ok(user)
    }
}
