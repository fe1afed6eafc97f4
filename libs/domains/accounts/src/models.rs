use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Named permission group, many-to-many with [`User`].
///
/// Roles are shared records referenced by id; user operations never
/// mutate the role itself, only which roles a user holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Role {
    pub id: i32,
    pub name: String,
}

/// User entity with its owned role set.
///
/// The role set is value-like: no duplicates, order insignificant,
/// exclusively owned by the user. The id is assigned by the store and
/// immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub login: String,
    /// Stored as-is; never exposed in API responses
    #[serde(skip_serializing)]
    pub password: String,
    pub roles: Vec<Role>,
}

/// A user about to be persisted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub login: String,
    pub password: String,
}

/// Body of `POST /users`.
///
/// Both fields are optional at the wire level so the validation routine
/// can report "was not provided" instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateUserPayload {
    pub login: Option<String>,
    pub password: Option<String>,
}

/// Body of `PUT /users/{id}`; absent fields are left unchanged.
///
/// `roles` replaces the whole role set: an empty list clears it.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateUserPayload {
    pub login: Option<String>,
    pub password: Option<String>,
    pub roles: Option<Vec<i32>>,
}

/// User representation returned by read endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub login: String,
    pub roles: Vec<Role>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            login: user.login,
            roles: user.roles,
        }
    }
}

/// Mutation result: the user merged with a success flag.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserMutationResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub success: bool,
}

impl From<User> for UserMutationResponse {
    fn from(user: User) -> Self {
        Self {
            user: user.into(),
            success: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_never_serialized() {
        let user = User {
            id: 1,
            login: "nikita-bayderin".to_string(),
            password: "9U)Hf(r".to_string(),
            roles: vec![],
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["login"], "nikita-bayderin");
    }

    #[test]
    fn mutation_response_flattens_user_fields() {
        let user = User {
            id: 7,
            login: "alex".to_string(),
            password: "Qwe1".to_string(),
            roles: vec![Role {
                id: 3,
                name: "manager".to_string(),
            }],
        };

        let json = serde_json::to_value(UserMutationResponse::from(user)).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["login"], "alex");
        assert_eq!(json["success"], true);
        assert_eq!(json["roles"][0]["id"], 3);
    }
}
