use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::AccountResult;
use crate::models::{CreateUserPayload, Role, UpdateUserPayload, UserMutationResponse, UserResponse};
use crate::repository::{RoleRepository, UserRepository};
use crate::service::AccountService;

const TAG: &str = "users";

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(get_all_users, create_user, get_user, update_user, delete_user),
    components(schemas(
        Role,
        CreateUserPayload,
        UpdateUserPayload,
        UserResponse,
        UserMutationResponse
    )),
    tags(
        (name = TAG, description = "User account management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<U, R>(service: AccountService<U, R>) -> Router
where
    U: UserRepository + 'static,
    R: RoleRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(get_all_users).post(create_user))
        .route(
            "/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .with_state(shared_service)
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "List of users", body = Vec<UserResponse>),
        (status = 500, description = "Internal server error")
    )
)]
async fn get_all_users<U: UserRepository, R: RoleRepository>(
    State(service): State<Arc<AccountService<U, R>>>,
) -> AccountResult<Json<Vec<UserResponse>>> {
    let users = service.get_all().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "User created successfully", body = UserMutationResponse),
        (status = 400, description = "Validation failed"),
        (status = 500, description = "Internal server error")
    )
)]
async fn create_user<U: UserRepository, R: RoleRepository>(
    State(service): State<Arc<AccountService<U, R>>>,
    Json(payload): Json<CreateUserPayload>,
) -> AccountResult<impl IntoResponse> {
    let user = service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(UserMutationResponse::from(user))))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    )
)]
async fn get_user<U: UserRepository, R: RoleRepository>(
    State(service): State<Arc<AccountService<U, R>>>,
    Path(id): Path<i32>,
) -> AccountResult<Json<UserResponse>> {
    let user = service.get_one(id).await?;
    Ok(Json(user.into()))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUserPayload,
    responses(
        (status = 200, description = "User updated successfully", body = UserMutationResponse),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    )
)]
async fn update_user<U: UserRepository, R: RoleRepository>(
    State(service): State<Arc<AccountService<U, R>>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUserPayload>,
) -> AccountResult<Json<UserMutationResponse>> {
    let user = service.update(id, payload).await?;
    Ok(Json(user.into()))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted, returns the id", body = i32),
        (status = 500, description = "Internal server error")
    )
)]
async fn delete_user<U: UserRepository, R: RoleRepository>(
    State(service): State<Arc<AccountService<U, R>>>,
    Path(id): Path<i32>,
) -> AccountResult<Json<i32>> {
    let id = service.remove(id).await?;
    Ok(Json(id))
}
