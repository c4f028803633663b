//! # Organisation Repository
//!
//! This module contains the repository implementation for Organisation
//! entities. Organisations are only ever created and listed; the owner is
//! fixed at creation and there is no update or delete operation.

use crate::error::RepositoryError;
use crate::models::organisation::{
    ActiveModel as OrganisationActiveModel, Column, Entity as Organisation,
    Model as OrganisationModel,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

/// Request data for creating a new organisation
#[derive(Debug, Clone)]
pub struct CreateOrganisationRequest {
    /// Display name for the organisation
    pub name: String,
    /// Identity-provider id of the owning user
    pub owner_user_id: String,
}

/// Repository for Organisation database operations
pub struct OrganisationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OrganisationRepository<'a> {
    /// Create a new OrganisationRepository with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a new organisation owned by the given user
    pub async fn create(
        &self,
        request: CreateOrganisationRequest,
    ) -> Result<OrganisationModel, RepositoryError> {
        let name = validate_name(&request.name)?;

        if request.owner_user_id.trim().is_empty() {
            return Err(RepositoryError::validation_error(
                "Organisation owner cannot be empty",
            ));
        }

        let organisation = OrganisationActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            owner_user_id: Set(request.owner_user_id),
            created_at: Set(Utc::now().into()),
        };

        organisation
            .insert(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// List organisations owned by the given user, newest first
    pub async fn list_owned_by(
        &self,
        owner_user_id: &str,
    ) -> Result<Vec<OrganisationModel>, RepositoryError> {
        Organisation::find()
            .filter(Column::OwnerUserId.eq(owner_user_id))
            .order_by_desc(Column::CreatedAt)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Get an organisation by ID
    pub async fn find_by_id(
        &self,
        organisation_id: Uuid,
    ) -> Result<Option<OrganisationModel>, RepositoryError> {
        Organisation::find_by_id(organisation_id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }
}

/// Validate and normalize an organisation name
fn validate_name(name: &str) -> Result<String, RepositoryError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(RepositoryError::validation_error(
            "Organisation name cannot be empty",
        ));
    }

    if trimmed.len() > 255 {
        return Err(RepositoryError::validation_error(
            "Organisation name cannot exceed 255 characters",
        ));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::MigratorTrait;
    use sea_orm::Database;

    async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        db
    }

    #[tokio::test]
    async fn create_trims_name_and_sets_owner() {
        let db = setup_test_db().await;
        let repo = OrganisationRepository::new(&db);

        let created = repo
            .create(CreateOrganisationRequest {
                name: "  Acme Holdings  ".to_string(),
                owner_user_id: "user_1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(created.name, "Acme Holdings");
        assert_eq!(created.owner_user_id, "user_1");
    }

    #[tokio::test]
    async fn create_rejects_blank_name() {
        let db = setup_test_db().await;
        let repo = OrganisationRepository::new(&db);

        let result = repo
            .create(CreateOrganisationRequest {
                name: "   ".to_string(),
                owner_user_id: "user_1".to_string(),
            })
            .await;

        assert!(matches!(result, Err(RepositoryError::Validation(_))));

        let listed = repo.list_owned_by("user_1").await.unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn list_returns_only_owned_newest_first() {
        let db = setup_test_db().await;
        let repo = OrganisationRepository::new(&db);

        let first = repo
            .create(CreateOrganisationRequest {
                name: "First".to_string(),
                owner_user_id: "user_1".to_string(),
            })
            .await
            .unwrap();
        repo.create(CreateOrganisationRequest {
            name: "Other Owner".to_string(),
            owner_user_id: "user_2".to_string(),
        })
        .await
        .unwrap();

        // Nudge the second row later so ordering is deterministic.
        let mut newer: OrganisationActiveModel = repo
            .create(CreateOrganisationRequest {
                name: "Second".to_string(),
                owner_user_id: "user_1".to_string(),
            })
            .await
            .unwrap()
            .into();
        newer.created_at = Set((Utc::now() + chrono::Duration::seconds(5)).into());
        let newer = newer.update(&db).await.unwrap();

        let listed = repo.list_owned_by("user_1").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, newer.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_unknown() {
        let db = setup_test_db().await;
        let repo = OrganisationRepository::new(&db);

        let found = repo.find_by_id(Uuid::new_v4()).await.unwrap();
        assert!(found.is_none());
    }
}
