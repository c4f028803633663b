//! Entry entity model
//!
//! One (timestamp, value, optional note) data point for a metric. The
//! timestamp is midnight UTC of the day the value was recorded for.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "entries")]
pub struct Model {
    /// Auto-incrementing numeric id
    #[sea_orm(primary_key)]
    pub id: i64,

    pub organisation_id: Uuid,

    pub metric_id: Uuid,

    /// Midnight UTC of the supplied date
    pub ts: DateTimeWithTimeZone,

    /// Finite numeric value
    pub value: f64,

    /// Optional free-form note; empty input is stored as NULL
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::metric_definition::Entity",
        from = "Column::MetricId",
        to = "super::metric_definition::Column::Id"
    )]
    MetricDefinition,
}

impl Related<super::metric_definition::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MetricDefinition.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
