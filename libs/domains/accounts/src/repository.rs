use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{AccountError, AccountResult};
use crate::models::{NewUser, Role, User};

/// Outcome of a bulk role lookup.
///
/// Every requested id is attempted; `missing` holds the ids that matched
/// no stored role, in input order. Duplicate ids are resolved once.
#[derive(Debug, Default)]
pub struct RoleLookup {
    pub found: Vec<Role>,
    pub missing: Vec<i32>,
}

/// Store trait for User persistence
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user; the store assigns the id
    async fn insert(&self, user: NewUser) -> AccountResult<User>;

    /// Get a user by id with its role set resolved
    async fn find_by_id(&self, id: i32) -> AccountResult<Option<User>>;

    /// List all users
    async fn find_all(&self) -> AccountResult<Vec<User>>;

    /// Persist login, password, and the full role set of an existing user
    async fn update(&self, user: User) -> AccountResult<User>;

    /// Delete a user by id; returns whether a row was removed
    async fn delete(&self, id: i32) -> AccountResult<bool>;
}

/// Store trait for Role lookups
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Persist a new role; the store assigns the id
    async fn insert(&self, name: &str) -> AccountResult<Role>;

    /// Get a role by id
    async fn find_by_id(&self, id: i32) -> AccountResult<Option<Role>>;

    /// Resolve a batch of role ids; see [`RoleLookup`]
    async fn find_by_ids(&self, ids: &[i32]) -> AccountResult<RoleLookup>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<i32, User>>>,
    next_id: Arc<AtomicI32>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI32::new(1)),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: NewUser) -> AccountResult<User> {
        let mut users = self.users.write().await;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let user = User {
            id,
            login: user.login,
            password: user.password,
            roles: Vec::new(),
        };
        users.insert(id, user.clone());

        tracing::info!(user_id = %id, login = %user.login, "Created user");
        Ok(user)
    }

    async fn find_by_id(&self, id: i32) -> AccountResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_all(&self) -> AccountResult<Vec<User>> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users.values().cloned().collect();
        result.sort_by_key(|u| u.id);
        Ok(result)
    }

    async fn update(&self, user: User) -> AccountResult<User> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(AccountError::NotFound(user.id));
        }

        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, "Updated user");
        Ok(user)
    }

    async fn delete(&self, id: i32) -> AccountResult<bool> {
        let mut users = self.users.write().await;

        if users.remove(&id).is_some() {
            tracing::info!(user_id = %id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

/// In-memory implementation of RoleRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryRoleRepository {
    roles: Arc<RwLock<HashMap<i32, Role>>>,
    next_id: Arc<AtomicI32>,
}

impl InMemoryRoleRepository {
    pub fn new() -> Self {
        Self {
            roles: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI32::new(1)),
        }
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn insert(&self, name: &str) -> AccountResult<Role> {
        let mut roles = self.roles.write().await;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let role = Role {
            id,
            name: name.to_string(),
        };
        roles.insert(id, role.clone());

        tracing::info!(role_id = %id, name = %name, "Created role");
        Ok(role)
    }

    async fn find_by_id(&self, id: i32) -> AccountResult<Option<Role>> {
        let roles = self.roles.read().await;
        Ok(roles.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> AccountResult<RoleLookup> {
        let roles = self.roles.read().await;

        let mut lookup = RoleLookup::default();
        let mut seen = HashSet::new();

        for id in ids {
            if !seen.insert(*id) {
                continue;
            }
            match roles.get(id) {
                Some(role) => lookup.found.push(role.clone()),
                None => lookup.missing.push(*id),
            }
        }

        Ok(lookup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();

        let first = repo
            .insert(NewUser {
                login: "nikita-bayderin".to_string(),
                password: "9U)Hf(r".to_string(),
            })
            .await
            .unwrap();
        let second = repo
            .insert(NewUser {
                login: "dmitry-bogatyrev".to_string(),
                password: "Abc123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(first.roles.is_empty());

        let fetched = repo.find_by_id(first.id).await.unwrap().unwrap();
        assert_eq!(fetched.login, "nikita-bayderin");
    }

    #[tokio::test]
    async fn update_unknown_user_is_not_found() {
        let repo = InMemoryUserRepository::new();

        let result = repo
            .update(User {
                id: 99,
                login: "ghost".to_string(),
                password: "Gh0st".to_string(),
                roles: vec![],
            })
            .await;

        assert!(matches!(result, Err(AccountError::NotFound(99))));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let repo = InMemoryUserRepository::new();

        let user = repo
            .insert(NewUser {
                login: "alex".to_string(),
                password: "Qwe1".to_string(),
            })
            .await
            .unwrap();

        assert!(repo.delete(user.id).await.unwrap());
        assert!(!repo.delete(user.id).await.unwrap());
    }

    #[tokio::test]
    async fn role_lookup_separates_found_and_missing() {
        let repo = InMemoryRoleRepository::new();

        let admin = repo.insert("admin").await.unwrap();
        let manager = repo.insert("manager").await.unwrap();

        let lookup = repo
            .find_by_ids(&[manager.id, 42, admin.id, 43])
            .await
            .unwrap();

        assert_eq!(
            lookup.found.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![manager.id, admin.id]
        );
        assert_eq!(lookup.missing, vec![42, 43]);
    }

    #[tokio::test]
    async fn role_lookup_deduplicates_ids() {
        let repo = InMemoryRoleRepository::new();

        let admin = repo.insert("admin").await.unwrap();

        let lookup = repo
            .find_by_ids(&[admin.id, admin.id, 42, 42])
            .await
            .unwrap();

        assert_eq!(lookup.found.len(), 1);
        assert_eq!(lookup.missing, vec![42]);
    }
}
