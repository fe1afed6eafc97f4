use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// Baseline roles; role management has no HTTP surface in this service,
// so the catalogue is provisioned here.
const ROLE_NAMES: [&str; 3] = ["admin", "manager", "user"];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert()
            .into_table(Roles::Table)
            .columns([Roles::Name])
            .to_owned();

        for name in ROLE_NAMES {
            insert.values_panic([name.into()]);
        }

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Roles::Table)
                    .and_where(
                        Expr::col(Roles::Name)
                            .is_in(ROLE_NAMES.iter().copied().collect::<Vec<_>>()),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Roles {
    Table,
    Name,
}
