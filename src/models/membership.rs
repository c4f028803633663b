//! Membership entity model
//!
//! A membership grants a user (or a pending email) a role within an
//! organisation. A claimed membership always carries a user_id; a row with
//! a NULL user_id is an email-only placeholder.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Role granted to an organisation member.
pub const ROLE_MEMBER: &str = "member";
/// Role granted to an organisation administrator.
pub const ROLE_ADMIN: &str = "admin";

/// Returns true when `role` is one of the recognised role values.
pub fn is_valid_role(role: &str) -> bool {
    matches!(role, ROLE_MEMBER | ROLE_ADMIN)
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "memberships")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub organisation_id: Uuid,

    /// Identity-provider user id; NULL until the invite is claimed
    pub user_id: Option<String>,

    /// Normalized (trimmed, lowercased) email address
    pub email: String,

    /// "member" or "admin"
    pub role: String,

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
