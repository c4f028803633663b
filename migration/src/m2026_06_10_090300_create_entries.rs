//! Migration to create the entries table.
//!
//! Entries are append-only time-series points. The timestamp is always
//! midnight UTC of the day the value was recorded for.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Entries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Entries::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Entries::OrganisationId).uuid().not_null())
                    .col(ColumnDef::new(Entries::MetricId).uuid().not_null())
                    .col(
                        ColumnDef::new(Entries::Ts)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Entries::Value).double().not_null())
                    .col(ColumnDef::new(Entries::Notes).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_entries_metric")
                            .from(Entries::Table, Entries::MetricId)
                            .to(MetricDefinitions::Table, MetricDefinitions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_entries_metric_ts")
                    .table(Entries::Table)
                    .col(Entries::MetricId)
                    .col(Entries::Ts)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Entries::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Entries {
    Table,
    Id,
    OrganisationId,
    MetricId,
    Ts,
    Value,
    Notes,
}

#[derive(DeriveIden)]
enum MetricDefinitions {
    Table,
    Id,
}
