//! # Invite Repository
//!
//! Invites are unique per (organisation, normalized email). Re-inviting an
//! address upserts onto the existing row and forces its status back to
//! pending, whatever it was before.

use crate::error::RepositoryError;
use crate::models::invite::{
    ActiveModel as InviteActiveModel, Column, Entity as Invite, Model as InviteModel,
    STATUS_PENDING, STATUS_REVOKED,
};
use crate::models::membership::is_valid_role;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

/// Repository for Invite database operations
pub struct InviteRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InviteRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Upsert an invite keyed by (organisation, normalized email), forcing
    /// status back to pending and refreshing the role.
    pub async fn upsert_pending(
        &self,
        organisation_id: Uuid,
        email: &str,
        role: &str,
    ) -> Result<InviteModel, RepositoryError> {
        if !is_valid_role(role) {
            return Err(RepositoryError::validation_error(format!(
                "Unknown role '{}'",
                role
            )));
        }

        let existing = self.find_by_email(organisation_id, email).await?;

        if let Some(existing) = existing {
            let mut invite = existing.into_active_model();
            invite.status = Set(STATUS_PENDING.to_string());
            invite.role = Set(role.to_string());
            invite
                .update(self.db)
                .await
                .map_err(RepositoryError::database_error)
        } else {
            let invite = InviteActiveModel {
                id: Set(Uuid::new_v4()),
                organisation_id: Set(organisation_id),
                email: Set(email.to_string()),
                role: Set(role.to_string()),
                status: Set(STATUS_PENDING.to_string()),
                created_at: Set(Utc::now().into()),
            };
            invite
                .insert(self.db)
                .await
                .map_err(RepositoryError::database_error)
        }
    }

    /// List invites for an organisation, newest first
    pub async fn list_for_organisation(
        &self,
        organisation_id: Uuid,
    ) -> Result<Vec<InviteModel>, RepositoryError> {
        Invite::find()
            .filter(Column::OrganisationId.eq(organisation_id))
            .order_by_desc(Column::CreatedAt)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Find the invite for a normalized email within an organisation
    pub async fn find_by_email(
        &self,
        organisation_id: Uuid,
        email: &str,
    ) -> Result<Option<InviteModel>, RepositoryError> {
        Invite::find()
            .filter(Column::OrganisationId.eq(organisation_id))
            .filter(Column::Email.eq(email))
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Mark a pending invite revoked. Accepted or already-revoked invites
    /// are not rewritten; the status machine only moves forward.
    pub async fn revoke(
        &self,
        organisation_id: Uuid,
        invite_id: Uuid,
    ) -> Result<InviteModel, RepositoryError> {
        let invite = Invite::find_by_id(invite_id)
            .filter(Column::OrganisationId.eq(organisation_id))
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::NotFound("Invite not found".to_string()))?;

        if invite.status != STATUS_PENDING {
            return Err(RepositoryError::Conflict(format!(
                "Invite is {} and can no longer be revoked",
                invite.status
            )));
        }

        let mut invite = invite.into_active_model();
        invite.status = Set(STATUS_REVOKED.to_string());
        invite
            .update(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }
}
