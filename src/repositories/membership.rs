//! # Membership Repository
//!
//! Memberships are created by the invite claim flow (with a user id) or as
//! email-only placeholders, and removed by explicit member action. Matching
//! a member prefers user_id and falls back to the normalized email.

use crate::error::RepositoryError;
use crate::models::membership::{
    ActiveModel as MembershipActiveModel, Column, Entity as Membership, Model as MembershipModel,
    is_valid_role,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

/// Request data for creating a membership row
#[derive(Debug, Clone)]
pub struct CreateMembershipRequest {
    pub organisation_id: Uuid,
    /// Identity-provider user id; None for an email-only placeholder
    pub user_id: Option<String>,
    /// Normalized email address
    pub email: String,
    pub role: String,
}

/// Repository for Membership database operations
pub struct MembershipRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MembershipRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a membership row
    pub async fn create(
        &self,
        request: CreateMembershipRequest,
    ) -> Result<MembershipModel, RepositoryError> {
        if !is_valid_role(&request.role) {
            return Err(RepositoryError::validation_error(format!(
                "Unknown role '{}'",
                request.role
            )));
        }
        if request.email.trim().is_empty() {
            return Err(RepositoryError::validation_error(
                "Membership email cannot be empty",
            ));
        }

        let membership = MembershipActiveModel {
            id: Set(Uuid::new_v4()),
            organisation_id: Set(request.organisation_id),
            user_id: Set(request.user_id),
            email: Set(request.email),
            role: Set(request.role),
            created_at: Set(Utc::now().into()),
        };

        membership
            .insert(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// List memberships for an organisation, newest first
    pub async fn list_for_organisation(
        &self,
        organisation_id: Uuid,
    ) -> Result<Vec<MembershipModel>, RepositoryError> {
        Membership::find()
            .filter(Column::OrganisationId.eq(organisation_id))
            .order_by_desc(Column::CreatedAt)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Find the membership matching a user by user_id or normalized email
    pub async fn find_for_user(
        &self,
        organisation_id: Uuid,
        user_id: &str,
        email: Option<&str>,
    ) -> Result<Option<MembershipModel>, RepositoryError> {
        let mut matcher = Condition::any().add(Column::UserId.eq(user_id));
        if let Some(email) = email {
            matcher = matcher.add(Column::Email.eq(email));
        }

        Membership::find()
            .filter(Column::OrganisationId.eq(organisation_id))
            .filter(matcher)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Remove a membership, by user_id when present, otherwise by normalized
    /// email restricted to placeholder rows (NULL user_id). Returns the
    /// number of rows removed.
    pub async fn remove(
        &self,
        organisation_id: Uuid,
        user_id: Option<&str>,
        email: &str,
    ) -> Result<u64, RepositoryError> {
        let delete = if let Some(user_id) = user_id {
            Membership::delete_many()
                .filter(Column::OrganisationId.eq(organisation_id))
                .filter(Column::UserId.eq(user_id))
        } else {
            // Restricting to NULL user_id keeps a claimed membership that
            // shares the email out of reach of this path.
            Membership::delete_many()
                .filter(Column::OrganisationId.eq(organisation_id))
                .filter(Column::Email.eq(email))
                .filter(Column::UserId.is_null())
        };

        let result = delete
            .exec(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(result.rows_affected)
    }
}
