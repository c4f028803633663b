//! # Subsidiary Repository

use crate::error::RepositoryError;
use crate::models::subsidiary::{
    ActiveModel as SubsidiaryActiveModel, Column, Entity as Subsidiary, Model as SubsidiaryModel,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

/// Repository for Subsidiary database operations
pub struct SubsidiaryRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SubsidiaryRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a new subsidiary under the given organisation
    pub async fn create(
        &self,
        organisation_id: Uuid,
        name: &str,
    ) -> Result<SubsidiaryModel, RepositoryError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(RepositoryError::validation_error(
                "Subsidiary name cannot be empty",
            ));
        }

        let subsidiary = SubsidiaryActiveModel {
            id: Set(Uuid::new_v4()),
            organisation_id: Set(organisation_id),
            name: Set(trimmed.to_string()),
            created_at: Set(Utc::now().into()),
        };

        subsidiary
            .insert(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// List subsidiaries for an organisation, newest first
    pub async fn list_for_organisation(
        &self,
        organisation_id: Uuid,
    ) -> Result<Vec<SubsidiaryModel>, RepositoryError> {
        Subsidiary::find()
            .filter(Column::OrganisationId.eq(organisation_id))
            .order_by_desc(Column::CreatedAt)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }
}
