//! Adds partial unique indexes preventing duplicate memberships.
//!
//! Claimed rows are unique per (organisation_id, user_id); placeholder rows
//! without a user are unique per (organisation_id, email). A concurrent
//! invite claim hits the first index and degrades to a no-op.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{DatabaseBackend, Statement};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        match backend {
            DatabaseBackend::Postgres => {
                manager
                    .get_connection()
                    .execute(Statement::from_string(
                        backend,
                        "DO $$\nBEGIN\n    IF NOT EXISTS (\n        SELECT 1 FROM pg_indexes\n        WHERE schemaname = current_schema()\n          AND indexname = 'idx_memberships_org_user'\n    ) THEN\n        CREATE UNIQUE INDEX idx_memberships_org_user\n            ON memberships (organisation_id, user_id)\n            WHERE user_id IS NOT NULL;\n    END IF;\n    IF NOT EXISTS (\n        SELECT 1 FROM pg_indexes\n        WHERE schemaname = current_schema()\n          AND indexname = 'idx_memberships_org_email_placeholder'\n    ) THEN\n        CREATE UNIQUE INDEX idx_memberships_org_email_placeholder\n            ON memberships (organisation_id, email)\n            WHERE user_id IS NULL;\n    END IF;\nEND\n$$;"
                            .to_string(),
                    ))
                    .await
                    .map(|_| ())
            }
            _ => {
                let conn = manager.get_connection();
                conn.execute(Statement::from_string(
                    backend,
                    "CREATE UNIQUE INDEX IF NOT EXISTS idx_memberships_org_user \
                     ON memberships (organisation_id, user_id) \
                     WHERE user_id IS NOT NULL"
                        .to_string(),
                ))
                .await?;
                conn.execute(Statement::from_string(
                    backend,
                    "CREATE UNIQUE INDEX IF NOT EXISTS idx_memberships_org_email_placeholder \
                     ON memberships (organisation_id, email) \
                     WHERE user_id IS NULL"
                        .to_string(),
                ))
                .await
                .map(|_| ())
            }
        }
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        conn.execute(Statement::from_string(
            manager.get_database_backend(),
            "DROP INDEX IF EXISTS idx_memberships_org_user",
        ))
        .await?;
        conn.execute(Statement::from_string(
            manager.get_database_backend(),
            "DROP INDEX IF EXISTS idx_memberships_org_email_placeholder",
        ))
        .await
        .map(|_| ())
    }
}
