//! Organisation entity model
//!
//! This module contains the SeaORM entity model for the organisations table,
//! the top-level tenant unit that owns every other record.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Organisation entity representing a top-level tenant
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "organisations")]
pub struct Model {
    /// Unique identifier for the organisation (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Display name, trimmed and non-empty
    pub name: String,

    /// Identity-provider id of the owning user; set at creation, never updated
    pub owner_user_id: String,

    /// Timestamp when the organisation was created
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::subsidiary::Entity")]
    Subsidiaries,
    #[sea_orm(has_many = "super::metric_definition::Entity")]
    MetricDefinitions,
    #[sea_orm(has_many = "super::membership::Entity")]
    Memberships,
    #[sea_orm(has_many = "super::invite::Entity")]
    Invites,
}

impl Related<super::subsidiary::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subsidiaries.def()
    }
}

impl Related<super::metric_definition::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MetricDefinitions.def()
    }
}

impl Related<super::membership::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Memberships.def()
    }
}

impl Related<super::invite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invites.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
