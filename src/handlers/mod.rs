//! # API Handlers
//!
//! This module contains all the HTTP endpoint handlers for the Metricboard API.

use crate::error::ApiError;
use crate::models::ServiceInfo;
use crate::server::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod entries;
pub mod invites;
pub mod members;
pub mod metrics;
pub mod orgs;
pub mod overview;
pub mod subsidiaries;

/// Root handler that returns basic service information
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service information", body = ServiceInfo)
    ),
    tag = "root"
)]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo::default())
}

/// Liveness response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Overall service status
    #[schema(example = "ok")]
    pub status: String,
}

/// Liveness probe that also pings the database
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = ApiError)
    ),
    tag = "root"
)]
pub async fn healthz(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    if let Err(err) = crate::db::health_check(&state.db).await {
        tracing::warn!("Health check failed: {:?}", err);
        return Err(ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
            "Database unreachable",
        ));
    }

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}
