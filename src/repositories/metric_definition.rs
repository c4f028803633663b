//! # Metric Definition Repository

use crate::error::RepositoryError;
use crate::models::metric_definition::{
    ActiveModel as MetricActiveModel, Column, Entity as MetricDefinition, Model as MetricModel,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

/// Request data for creating a new metric definition
#[derive(Debug, Clone)]
pub struct CreateMetricRequest {
    pub organisation_id: Uuid,
    pub name: String,
    /// Optional unit tag; blank input is stored as NULL
    pub unit: Option<String>,
}

/// Repository for Metric Definition database operations
pub struct MetricDefinitionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MetricDefinitionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a new metric definition
    pub async fn create(
        &self,
        request: CreateMetricRequest,
    ) -> Result<MetricModel, RepositoryError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(RepositoryError::validation_error(
                "Metric name cannot be empty",
            ));
        }

        let unit = request
            .unit
            .as_deref()
            .map(str::trim)
            .filter(|unit| !unit.is_empty())
            .map(str::to_string);

        let metric = MetricActiveModel {
            id: Set(Uuid::new_v4()),
            organisation_id: Set(request.organisation_id),
            name: Set(name.to_string()),
            unit: Set(unit),
            created_at: Set(Utc::now().into()),
        };

        metric
            .insert(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// List metric definitions for an organisation, newest first
    pub async fn list_for_organisation(
        &self,
        organisation_id: Uuid,
    ) -> Result<Vec<MetricModel>, RepositoryError> {
        MetricDefinition::find()
            .filter(Column::OrganisationId.eq(organisation_id))
            .order_by_desc(Column::CreatedAt)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Get a metric definition, checking it belongs to the given organisation
    pub async fn find_for_organisation(
        &self,
        organisation_id: Uuid,
        metric_id: Uuid,
    ) -> Result<Option<MetricModel>, RepositoryError> {
        let metric = MetricDefinition::find_by_id(metric_id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(metric.filter(|metric| metric.organisation_id == organisation_id))
    }
}
