//! Database migrations for the Metricboard API.
//!
//! This module contains all database migrations using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2026_06_10_090000_create_organisations;
mod m2026_06_10_090100_create_subsidiaries;
mod m2026_06_10_090200_create_metric_definitions;
mod m2026_06_10_090300_create_entries;
mod m2026_06_12_110000_create_memberships;
mod m2026_06_12_110100_create_invites;
mod m2026_06_20_101500_add_membership_claim_unique_guard;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2026_06_10_090000_create_organisations::Migration),
            Box::new(m2026_06_10_090100_create_subsidiaries::Migration),
            Box::new(m2026_06_10_090200_create_metric_definitions::Migration),
            Box::new(m2026_06_10_090300_create_entries::Migration),
            Box::new(m2026_06_12_110000_create_memberships::Migration),
            Box::new(m2026_06_12_110100_create_invites::Migration),
            Box::new(m2026_06_20_101500_add_membership_claim_unique_guard::Migration),
        ]
    }
}
