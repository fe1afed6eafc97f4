pub use sea_orm_migration::prelude::*;

mod m20250810_000000_create_users;
mod m20250810_000001_create_roles;
mod m20250810_000002_create_user_roles;
mod m20250811_000000_seed_roles;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250810_000000_create_users::Migration),
            Box::new(m20250810_000001_create_roles::Migration),
            Box::new(m20250810_000002_create_user_roles::Migration),
            Box::new(m20250811_000000_seed_roles::Migration),
        ]
    }
}
