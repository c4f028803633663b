//! Migration to create the subsidiaries table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subsidiaries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subsidiaries::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Subsidiaries::OrganisationId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Subsidiaries::Name).text().not_null())
                    .col(
                        ColumnDef::new(Subsidiaries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subsidiaries_organisation")
                            .from(Subsidiaries::Table, Subsidiaries::OrganisationId)
                            .to(Organisations::Table, Organisations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_subsidiaries_organisation")
                    .table(Subsidiaries::Table)
                    .col(Subsidiaries::OrganisationId)
                    .col(Subsidiaries::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subsidiaries::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Subsidiaries {
    Table,
    Id,
    OrganisationId,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Organisations {
    Table,
    Id,
}
