//! Migration to create the metric_definitions table.
//!
//! A metric definition names a time series within an organisation; the unit
//! tag is optional display metadata.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MetricDefinitions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MetricDefinitions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MetricDefinitions::OrganisationId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MetricDefinitions::Name).text().not_null())
                    .col(ColumnDef::new(MetricDefinitions::Unit).text())
                    .col(
                        ColumnDef::new(MetricDefinitions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_metric_definitions_organisation")
                            .from(
                                MetricDefinitions::Table,
                                MetricDefinitions::OrganisationId,
                            )
                            .to(Organisations::Table, Organisations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_metric_definitions_organisation")
                    .table(MetricDefinitions::Table)
                    .col(MetricDefinitions::OrganisationId)
                    .col(MetricDefinitions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MetricDefinitions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MetricDefinitions {
    Table,
    Id,
    OrganisationId,
    Name,
    Unit,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Organisations {
    Table,
    Id,
}
