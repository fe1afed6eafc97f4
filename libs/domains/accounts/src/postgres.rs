//! PostgreSQL implementations of the account stores using SeaORM.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

use crate::entity::{role, user, user_role};
use crate::error::{AccountError, AccountResult};
use crate::models::{NewUser, Role, User};
use crate::repository::{RoleLookup, RoleRepository, UserRepository};

fn db_err(e: DbErr) -> AccountError {
    AccountError::Internal(format!("Database error: {}", e))
}

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(&self, user: NewUser) -> AccountResult<User> {
        let model = user::ActiveModel {
            login: Set(user.login),
            password: Set(user.password),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        tracing::info!(user_id = %model.id, login = %model.login, "Created user");
        Ok((model, Vec::new()).into())
    }

    async fn find_by_id(&self, id: i32) -> AccountResult<Option<User>> {
        let rows = user::Entity::find_by_id(id)
            .find_with_related(role::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows.into_iter().next().map(Into::into))
    }

    async fn find_all(&self) -> AccountResult<Vec<User>> {
        let rows = user::Entity::find()
            .find_with_related(role::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, user: User) -> AccountResult<User> {
        user::ActiveModel {
            id: Set(user.id),
            login: Set(user.login.clone()),
            password: Set(user.password.clone()),
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => AccountError::NotFound(user.id),
            other => db_err(other),
        })?;

        // Full replacement of the role set: drop the join rows, then
        // re-insert the current assignment.
        user_role::Entity::delete_many()
            .filter(user_role::Column::UserId.eq(user.id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if !user.roles.is_empty() {
            let rows = user.roles.iter().map(|role| user_role::ActiveModel {
                user_id: Set(user.id),
                role_id: Set(role.id),
            });
            user_role::Entity::insert_many(rows)
                .exec(&self.db)
                .await
                .map_err(db_err)?;
        }

        tracing::info!(user_id = %user.id, "Updated user");
        Ok(user)
    }

    async fn delete(&self, id: i32) -> AccountResult<bool> {
        // Join rows are removed by the ON DELETE CASCADE constraint.
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected > 0 {
            tracing::info!(user_id = %id, "Deleted user");
        }
        Ok(result.rows_affected > 0)
    }
}

/// PostgreSQL implementation of RoleRepository
#[derive(Clone)]
pub struct PgRoleRepository {
    db: DatabaseConnection,
}

impl PgRoleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    async fn insert(&self, name: &str) -> AccountResult<Role> {
        let model = role::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        Ok(model.into())
    }

    async fn find_by_id(&self, id: i32) -> AccountResult<Option<Role>> {
        let model = role::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(Into::into))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> AccountResult<RoleLookup> {
        // One query resolves the whole batch; found/missing are then
        // reassembled in input order.
        let models = role::Entity::find()
            .filter(role::Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let by_id: std::collections::HashMap<i32, Role> =
            models.into_iter().map(|m| (m.id, m.into())).collect();

        let mut lookup = RoleLookup::default();
        let mut seen = std::collections::HashSet::new();

        for id in ids {
            if !seen.insert(*id) {
                continue;
            }
            match by_id.get(id) {
                Some(role) => lookup.found.push(role.clone()),
                None => lookup.missing.push(*id),
            }
        }

        Ok(lookup)
    }
}
