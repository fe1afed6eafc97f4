use std::sync::Arc;

use crate::error::{AccountError, AccountResult};
use crate::models::{CreateUserPayload, NewUser, UpdateUserPayload, User};
use crate::repository::{RoleRepository, UserRepository};
use crate::validate;

fn provided(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Service layer for account business logic.
///
/// Orchestrates validation, persistence, and role resolution. Both
/// stores are injected at construction; there is no global registry.
#[derive(Clone)]
pub struct AccountService<U: UserRepository, R: RoleRepository> {
    users: Arc<U>,
    roles: Arc<R>,
}

impl<U: UserRepository, R: RoleRepository> AccountService<U, R> {
    pub fn new(users: U, roles: R) -> Self {
        Self {
            users: Arc::new(users),
            roles: Arc::new(roles),
        }
    }

    /// Create a new user with an empty role set.
    ///
    /// Login and password are both mandatory; all violations are
    /// collected into a single `Validation` error.
    pub async fn create(&self, payload: CreateUserPayload) -> AccountResult<User> {
        let errors =
            validate::validate_create(payload.login.as_deref(), payload.password.as_deref());
        if !errors.is_empty() {
            return Err(AccountError::Validation(errors));
        }

        // Validation guarantees both fields are present and non-blank.
        self.users
            .insert(NewUser {
                login: payload.login.unwrap_or_default(),
                password: payload.password.unwrap_or_default(),
            })
            .await
    }

    /// Get a user by id with its role set resolved.
    pub async fn get_one(&self, id: i32) -> AccountResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id))
    }

    /// List all users.
    pub async fn get_all(&self) -> AccountResult<Vec<User>> {
        self.users.find_all().await
    }

    /// Update a user: login replace, password replace, role set
    /// full-replace-by-list. Only supplied fields are touched; a blank
    /// login or password is ignored rather than rejected.
    ///
    /// Validation and role resolution complete before anything is
    /// persisted: every role id is looked up, all errors accumulate, and
    /// a single store write commits the staged changes only when the
    /// error list is empty.
    pub async fn update(&self, id: i32, payload: UpdateUserPayload) -> AccountResult<User> {
        let mut user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id))?;

        let mut errors = Vec::new();

        if let Some(login) = provided(payload.login.as_deref()) {
            user.login = login.to_string();
        }

        if let Some(password) = provided(payload.password.as_deref()) {
            let complexity = validate::password_complexity_errors(password);
            if complexity.is_empty() {
                user.password = password.to_string();
            } else {
                errors.extend(complexity);
            }
        }

        if let Some(role_ids) = &payload.roles {
            // Full replacement: an empty list clears the role set.
            let lookup = self.roles.find_by_ids(role_ids).await?;
            for missing in &lookup.missing {
                errors.push(format!("role with id {} has not found", missing));
            }
            user.roles = lookup.found;
        }

        if !errors.is_empty() {
            return Err(AccountError::Validation(errors));
        }

        self.users.update(user).await
    }

    /// Delete a user by id unconditionally and return the id.
    ///
    /// Deleting a non-existent id is a no-op, not an error.
    pub async fn remove(&self, id: i32) -> AccountResult<i32> {
        let deleted = self.users.delete(id).await?;
        if !deleted {
            tracing::debug!(user_id = %id, "Remove of non-existent user, nothing deleted");
        }
        Ok(id)
    }
}
