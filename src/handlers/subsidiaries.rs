//! # Subsidiary API Handlers

use crate::auth::{Identity, IdentityHeaders};
use crate::error::{ApiError, not_found, validation_error};
use crate::models::subsidiary;
use crate::repositories::{OrganisationRepository, SubsidiaryRepository};
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Subsidiary representation returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubsidiaryDto {
    pub id: Uuid,
    pub organisation_id: Uuid,
    /// Display name of the subsidiary
    #[schema(example = "North Region")]
    pub name: String,
    /// Timestamp when the subsidiary was created (ISO 8601)
    pub created_at: String,
}

impl From<subsidiary::Model> for SubsidiaryDto {
    fn from(model: subsidiary::Model) -> Self {
        Self {
            id: model.id,
            organisation_id: model.organisation_id,
            name: model.name,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// Request payload for creating a subsidiary
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateSubsidiaryRequestDto {
    /// Display name for the subsidiary (required, non-blank)
    #[schema(example = "North Region")]
    pub name: String,
}

/// Create a new subsidiary under an organisation
#[utoipa::path(
    post,
    path = "/api/v1/orgs/{id}/subsidiaries",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Organisation identifier"),
        IdentityHeaders
    ),
    request_body = CreateSubsidiaryRequestDto,
    responses(
        (status = 201, description = "Subsidiary created", body = SubsidiaryDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid credentials", body = ApiError),
        (status = 404, description = "Organisation not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "subsidiaries"
)]
pub async fn create_subsidiary(
    State(state): State<AppState>,
    _identity: Identity,
    Path(organisation_id): Path<Uuid>,
    Json(request): Json<CreateSubsidiaryRequestDto>,
) -> Result<(StatusCode, Json<SubsidiaryDto>), ApiError> {
    if request.name.trim().is_empty() {
        return Err(validation_error(
            "Subsidiary name is required and cannot be empty",
            serde_json::json!({ "name": "Must be provided and cannot be blank" }),
        ));
    }

    let orgs = OrganisationRepository::new(&state.db);
    if orgs.find_by_id(organisation_id).await?.is_none() {
        return Err(not_found("Organisation not found"));
    }

    let repo = SubsidiaryRepository::new(&state.db);
    let subsidiary = repo.create(organisation_id, &request.name).await?;

    Ok((StatusCode::CREATED, Json(subsidiary.into())))
}
