//! # Membership API Handlers
//!
//! Member removal refuses the caller's own membership and deletes by
//! user_id when one is supplied, otherwise by normalized email restricted
//! to placeholder rows.

use crate::auth::{Identity, IdentityHeaders, normalize_email};
use crate::error::{ApiError, not_found, validation_error};
use crate::models::membership;
use crate::repositories::MembershipRepository;
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Membership representation returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MembershipDto {
    pub id: Uuid,
    pub organisation_id: Uuid,
    /// Identity-provider user id; absent for email-only placeholder rows
    pub user_id: Option<String>,
    /// Normalized member email
    #[schema(example = "a@x.com")]
    pub email: String,
    /// "member" or "admin"
    #[schema(example = "member")]
    pub role: String,
    /// Timestamp when the membership was created (ISO 8601)
    pub created_at: String,
}

impl From<membership::Model> for MembershipDto {
    fn from(model: membership::Model) -> Self {
        Self {
            id: model.id,
            organisation_id: model.organisation_id,
            user_id: model.user_id,
            email: model.email,
            role: model.role,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// Request payload for removing a member
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RemoveMemberRequestDto {
    /// Email of the member to remove
    #[schema(example = "a@x.com")]
    pub email: String,
    /// Identity-provider user id of the member, when known
    pub user_id: Option<String>,
}

/// Remove a member from an organisation
#[utoipa::path(
    delete,
    path = "/api/v1/orgs/{id}/members",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Organisation identifier"),
        IdentityHeaders
    ),
    request_body = RemoveMemberRequestDto,
    responses(
        (status = 204, description = "Membership removed"),
        (status = 400, description = "Validation failed or self-removal attempted", body = ApiError),
        (status = 401, description = "Missing or invalid credentials", body = ApiError),
        (status = 404, description = "Membership not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "members"
)]
pub async fn remove_member(
    State(state): State<AppState>,
    identity: Identity,
    Path(organisation_id): Path<Uuid>,
    Json(request): Json<RemoveMemberRequestDto>,
) -> Result<StatusCode, ApiError> {
    let email = normalize_email(&request.email);
    if email.is_empty() {
        return Err(validation_error(
            "Member email is required",
            serde_json::json!({ "email": "Must be provided" }),
        ));
    }

    // Self-protection: never issue a delete for the caller's own membership.
    if Some(email.as_str()) == identity.normalized_email().as_deref() {
        return Err(validation_error(
            "You cannot remove your own membership",
            serde_json::json!({ "email": "Matches the signed-in user" }),
        ));
    }
    if request.user_id.as_deref() == Some(identity.user_id.as_str()) {
        return Err(validation_error(
            "You cannot remove your own membership",
            serde_json::json!({ "user_id": "Matches the signed-in user" }),
        ));
    }

    let repo = MembershipRepository::new(&state.db);
    let removed = repo
        .remove(organisation_id, request.user_id.as_deref(), &email)
        .await?;

    if removed == 0 {
        return Err(not_found("Membership not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}
