//! # Metric Definition API Handlers

use crate::auth::{Identity, IdentityHeaders};
use crate::error::{ApiError, not_found, validation_error};
use crate::models::metric_definition;
use crate::repositories::{CreateMetricRequest, MetricDefinitionRepository, OrganisationRepository};
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Metric definition representation returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MetricDefinitionDto {
    pub id: Uuid,
    pub organisation_id: Uuid,
    /// Display name of the metric
    #[schema(example = "Monthly Revenue")]
    pub name: String,
    /// Optional unit tag
    #[schema(example = "EUR")]
    pub unit: Option<String>,
    /// Timestamp when the metric was created (ISO 8601)
    pub created_at: String,
}

impl From<metric_definition::Model> for MetricDefinitionDto {
    fn from(model: metric_definition::Model) -> Self {
        Self {
            id: model.id,
            organisation_id: model.organisation_id,
            name: model.name,
            unit: model.unit,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// Request payload for creating a metric definition
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateMetricRequestDto {
    /// Display name for the metric (required, non-blank)
    #[schema(example = "Monthly Revenue")]
    pub name: String,
    /// Optional unit tag; blank input is treated as absent
    #[schema(example = "EUR")]
    pub unit: Option<String>,
}

/// Create a new metric definition under an organisation
#[utoipa::path(
    post,
    path = "/api/v1/orgs/{id}/metrics",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Organisation identifier"),
        IdentityHeaders
    ),
    request_body = CreateMetricRequestDto,
    responses(
        (status = 201, description = "Metric definition created", body = MetricDefinitionDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid credentials", body = ApiError),
        (status = 404, description = "Organisation not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "metrics"
)]
pub async fn create_metric_definition(
    State(state): State<AppState>,
    _identity: Identity,
    Path(organisation_id): Path<Uuid>,
    Json(request): Json<CreateMetricRequestDto>,
) -> Result<(StatusCode, Json<MetricDefinitionDto>), ApiError> {
    if request.name.trim().is_empty() {
        return Err(validation_error(
            "Metric name is required and cannot be empty",
            serde_json::json!({ "name": "Must be provided and cannot be blank" }),
        ));
    }

    let orgs = OrganisationRepository::new(&state.db);
    if orgs.find_by_id(organisation_id).await?.is_none() {
        return Err(not_found("Organisation not found"));
    }

    let repo = MetricDefinitionRepository::new(&state.db);
    let metric = repo
        .create(CreateMetricRequest {
            organisation_id,
            name: request.name,
            unit: request.unit,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(metric.into())))
}
