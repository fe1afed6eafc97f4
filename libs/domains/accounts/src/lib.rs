//! Accounts Domain
//!
//! User-account management: validated CRUD over users plus a
//! many-to-many role relation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation, role resolution
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (traits + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities and wire types
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_accounts::{
//!     handlers,
//!     repository::{InMemoryRoleRepository, InMemoryUserRepository},
//!     service::AccountService,
//! };
//!
//! let service = AccountService::new(
//!     InMemoryUserRepository::new(),
//!     InMemoryRoleRepository::new(),
//! );
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod validate;

// Re-export commonly used types
pub use error::{AccountError, AccountResult};
pub use models::{
    CreateUserPayload, NewUser, Role, UpdateUserPayload, User, UserMutationResponse, UserResponse,
};
pub use postgres::{PgRoleRepository, PgUserRepository};
pub use repository::{
    InMemoryRoleRepository, InMemoryUserRepository, RoleLookup, RoleRepository, UserRepository,
};
pub use service::AccountService;
