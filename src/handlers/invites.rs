//! # Invite API Handlers
//!
//! Inviting an email upserts onto the (organisation, email) row and forces
//! its status back to pending; the invitee's next organisation load claims
//! it automatically. Revoking only moves pending invites.

use crate::auth::{Identity, IdentityHeaders, normalize_email};
use crate::error::{ApiError, not_found, validation_error};
use crate::models::invite;
use crate::models::membership::{ROLE_MEMBER, is_valid_role};
use crate::repositories::{InviteRepository, OrganisationRepository};
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Invite representation returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InviteDto {
    pub id: Uuid,
    pub organisation_id: Uuid,
    /// Normalized invitee email
    #[schema(example = "a@x.com")]
    pub email: String,
    /// Role the claimed membership will carry
    #[schema(example = "member")]
    pub role: String,
    /// "pending", "accepted", or "revoked"
    #[schema(example = "pending")]
    pub status: String,
    /// Timestamp when the invite was first created (ISO 8601)
    pub created_at: String,
}

impl From<invite::Model> for InviteDto {
    fn from(model: invite::Model) -> Self {
        Self {
            id: model.id,
            organisation_id: model.organisation_id,
            email: model.email,
            role: model.role,
            status: model.status,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// Request payload for inviting a collaborator
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateInviteRequestDto {
    /// Invitee email address
    #[schema(example = "a@x.com")]
    pub email: String,
    /// Role the membership will carry; defaults to "member"
    #[schema(example = "member")]
    pub role: Option<String>,
}

/// Response for the invite upsert
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InviteResponse {
    pub invite: InviteDto,
    /// Hint for the caller's UI
    #[schema(example = "The invite will be accepted automatically when a@x.com signs in")]
    pub message: String,
}

/// Invite a collaborator by email (upsert, status forced to pending)
#[utoipa::path(
    post,
    path = "/api/v1/orgs/{id}/invites",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Organisation identifier"),
        IdentityHeaders
    ),
    request_body = CreateInviteRequestDto,
    responses(
        (status = 200, description = "Invite created or reset to pending", body = InviteResponse),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid credentials", body = ApiError),
        (status = 404, description = "Organisation not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "invites"
)]
pub async fn create_invite(
    State(state): State<AppState>,
    _identity: Identity,
    Path(organisation_id): Path<Uuid>,
    Json(request): Json<CreateInviteRequestDto>,
) -> Result<Json<InviteResponse>, ApiError> {
    let email = normalize_email(&request.email);
    if !email.contains('@') {
        return Err(validation_error(
            "Invite email must be a valid address",
            serde_json::json!({ "email": "Must contain '@'" }),
        ));
    }

    let role = request.role.unwrap_or_else(|| ROLE_MEMBER.to_string());
    if !is_valid_role(&role) {
        return Err(validation_error(
            "Unknown role",
            serde_json::json!({ "role": "Must be 'member' or 'admin'" }),
        ));
    }

    let orgs = OrganisationRepository::new(&state.db);
    if orgs.find_by_id(organisation_id).await?.is_none() {
        return Err(not_found("Organisation not found"));
    }

    let repo = InviteRepository::new(&state.db);
    let invite = repo.upsert_pending(organisation_id, &email, &role).await?;

    let message = format!(
        "The invite will be accepted automatically when {} signs in",
        invite.email
    );

    Ok(Json(InviteResponse {
        invite: invite.into(),
        message,
    }))
}

/// Revoke a pending invite
#[utoipa::path(
    post,
    path = "/api/v1/orgs/{id}/invites/{invite_id}/revoke",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Organisation identifier"),
        ("invite_id" = Uuid, Path, description = "Invite identifier"),
        IdentityHeaders
    ),
    responses(
        (status = 200, description = "Invite revoked", body = InviteDto),
        (status = 401, description = "Missing or invalid credentials", body = ApiError),
        (status = 404, description = "Invite not found", body = ApiError),
        (status = 409, description = "Invite is no longer pending", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "invites"
)]
pub async fn revoke_invite(
    State(state): State<AppState>,
    _identity: Identity,
    Path((organisation_id, invite_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<InviteDto>, ApiError> {
    let repo = InviteRepository::new(&state.db);
    let invite = repo.revoke(organisation_id, invite_id).await?;

    Ok(Json(invite.into()))
}
