//! # Organisation API Handlers
//!
//! This module contains handlers for the dashboard-level organisation
//! endpoints: listing the organisations the signed-in user owns and
//! creating new ones.

use crate::auth::{Identity, IdentityHeaders};
use crate::error::{ApiError, validation_error};
use crate::models::organisation;
use crate::repositories::{CreateOrganisationRequest, OrganisationRepository};
use crate::server::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Organisation representation returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrganisationDto {
    /// Unique identifier for the organisation (UUID)
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Display name of the organisation
    #[schema(example = "Acme Holdings")]
    pub name: String,
    /// Identity-provider id of the owning user
    pub owner_user_id: String,
    /// Timestamp when the organisation was created (ISO 8601)
    #[schema(example = "2026-06-15T10:30:00Z")]
    pub created_at: String,
}

impl From<organisation::Model> for OrganisationDto {
    fn from(model: organisation::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            owner_user_id: model.owner_user_id,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// Response containing the caller's organisations, newest first
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrganisationsResponse {
    pub organisations: Vec<OrganisationDto>,
}

/// Request payload for creating a new organisation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateOrganisationRequestDto {
    /// Display name for the organisation (required, non-blank)
    #[schema(example = "Acme Holdings")]
    pub name: String,
}

/// List organisations owned by the signed-in user, newest first
#[utoipa::path(
    get,
    path = "/api/v1/orgs",
    security(("bearer_auth" = [])),
    params(IdentityHeaders),
    responses(
        (status = 200, description = "Organisations owned by the caller", body = OrganisationsResponse),
        (status = 401, description = "Missing or invalid credentials", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "organisations"
)]
pub async fn list_organisations(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<OrganisationsResponse>, ApiError> {
    let repo = OrganisationRepository::new(&state.db);
    let organisations = repo.list_owned_by(&identity.user_id).await?;

    Ok(Json(OrganisationsResponse {
        organisations: organisations.into_iter().map(OrganisationDto::from).collect(),
    }))
}

/// Create a new organisation owned by the signed-in user
#[utoipa::path(
    post,
    path = "/api/v1/orgs",
    security(("bearer_auth" = [])),
    params(IdentityHeaders),
    request_body = CreateOrganisationRequestDto,
    responses(
        (status = 201, description = "Organisation created", body = OrganisationDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid credentials", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "organisations"
)]
pub async fn create_organisation(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<CreateOrganisationRequestDto>,
) -> Result<(StatusCode, Json<OrganisationDto>), ApiError> {
    if request.name.trim().is_empty() {
        return Err(validation_error(
            "Organisation name is required and cannot be empty",
            serde_json::json!({ "name": "Must be provided and cannot be blank" }),
        ));
    }

    let repo = OrganisationRepository::new(&state.db);
    let organisation = repo
        .create(CreateOrganisationRequest {
            name: request.name,
            owner_user_id: identity.user_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(organisation.into())))
}
