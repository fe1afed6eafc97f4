use axum::Router;

pub mod health;

use domain_accounts::{AccountService, PgRoleRepository, PgUserRepository};

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix is added by the `create_router` helper.
///
/// Returns a stateless Router; sub-routers have their state applied.
pub fn routes(state: &crate::state::AppState) -> Router {
    let service = AccountService::new(
        PgUserRepository::new(state.db.clone()),
        PgRoleRepository::new(state.db.clone()),
    );

    Router::new().nest("/users", domain_accounts::handlers::router(service))
}

/// Creates a router with the /ready endpoint that performs a real
/// database health check.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
