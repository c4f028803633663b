//! Invite entity model
//!
//! An invite is a pending grant of membership keyed by email. Status moves
//! pending -> accepted or pending -> revoked; re-inviting upserts the row
//! back to pending.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Invite awaiting the invitee's sign-in.
pub const STATUS_PENDING: &str = "pending";
/// Invite converted into a membership.
pub const STATUS_ACCEPTED: &str = "accepted";
/// Invite withdrawn by an organisation member.
pub const STATUS_REVOKED: &str = "revoked";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "invites")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub organisation_id: Uuid,

    /// Normalized (trimmed, lowercased) email address; unique per organisation
    pub email: String,

    /// Role the claimed membership will carry
    pub role: String,

    /// "pending", "accepted", or "revoked"
    pub status: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::organisation::Entity",
        from = "Column::OrganisationId",
        to = "super::organisation::Column::Id"
    )]
    Organisation,
}

impl Related<super::organisation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organisation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
