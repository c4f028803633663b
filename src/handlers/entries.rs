//! # Entry API Handlers
//!
//! Entries power the chart. The list endpoint returns the full ascending
//! series for one metric plus the derived "recent" (last ten, newest first)
//! and chart (`{date, value}`) projections, so switching the selected
//! metric is a single fetch.

use crate::auth::{Identity, IdentityHeaders};
use crate::error::{ApiError, not_found, validation_error};
use crate::handlers::metrics::MetricDefinitionDto;
use crate::models::entry;
use crate::repositories::{CreateEntryRequest, EntryRepository, MetricDefinitionRepository};
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Entry representation returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EntryDto {
    /// Numeric entry id
    pub id: i64,
    pub metric_id: Uuid,
    /// Timestamp of the entry, midnight UTC of the recorded day (ISO 8601)
    #[schema(example = "2026-06-01T00:00:00+00:00")]
    pub ts: String,
    /// Recorded value
    #[schema(example = 1250.0)]
    pub value: f64,
    /// Optional free-form note
    pub notes: Option<String>,
}

impl From<entry::Model> for EntryDto {
    fn from(model: entry::Model) -> Self {
        Self {
            id: model.id,
            metric_id: model.metric_id,
            ts: model.ts.to_rfc3339(),
            value: model.value,
            notes: model.notes,
        }
    }
}

/// One point of the chart projection
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChartPointDto {
    /// Day of the entry (YYYY-MM-DD)
    #[schema(example = "2026-06-01")]
    pub date: String,
    pub value: f64,
}

impl From<&entry::Model> for ChartPointDto {
    fn from(model: &entry::Model) -> Self {
        Self {
            date: model.ts.format("%Y-%m-%d").to_string(),
            value: model.value,
        }
    }
}

/// Response containing one metric's entry series and its projections
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MetricEntriesResponse {
    pub metric: MetricDefinitionDto,
    /// Full series, ascending by timestamp
    pub entries: Vec<EntryDto>,
    /// Last ten entries, newest first
    pub recent: Vec<EntryDto>,
    /// Chart projection of the ascending series
    pub chart: Vec<ChartPointDto>,
}

/// Request payload for recording an entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateEntryRequestDto {
    /// Day the value was recorded for (YYYY-MM-DD); stored as midnight UTC
    #[schema(example = "2026-06-01")]
    pub date: String,
    /// Value to record; must parse as a finite number
    #[schema(value_type = f64, example = 1250.0)]
    pub value: serde_json::Value,
    /// Optional free-form note
    pub notes: Option<String>,
}

/// List a metric's entries with recent and chart projections
#[utoipa::path(
    get,
    path = "/api/v1/orgs/{id}/metrics/{metric_id}/entries",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Organisation identifier"),
        ("metric_id" = Uuid, Path, description = "Metric identifier"),
        IdentityHeaders
    ),
    responses(
        (status = 200, description = "Entries for the metric", body = MetricEntriesResponse),
        (status = 401, description = "Missing or invalid credentials", body = ApiError),
        (status = 404, description = "Metric not found in this organisation", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "entries"
)]
pub async fn list_entries(
    State(state): State<AppState>,
    _identity: Identity,
    Path((organisation_id, metric_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<MetricEntriesResponse>, ApiError> {
    let metrics = MetricDefinitionRepository::new(&state.db);
    let metric = metrics
        .find_for_organisation(organisation_id, metric_id)
        .await?
        .ok_or_else(|| not_found("Metric not found in this organisation"))?;

    let entries_repo = EntryRepository::new(&state.db);
    let entries = entries_repo.list_for_metric(metric_id).await?;
    let recent = entries_repo.recent_for_metric(metric_id).await?;

    let chart = entries.iter().map(ChartPointDto::from).collect();

    Ok(Json(MetricEntriesResponse {
        metric: metric.into(),
        entries: entries.into_iter().map(EntryDto::from).collect(),
        recent: recent.into_iter().map(EntryDto::from).collect(),
        chart,
    }))
}

/// Record a new entry for a metric
#[utoipa::path(
    post,
    path = "/api/v1/orgs/{id}/metrics/{metric_id}/entries",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Organisation identifier"),
        ("metric_id" = Uuid, Path, description = "Metric identifier"),
        IdentityHeaders
    ),
    request_body = CreateEntryRequestDto,
    responses(
        (status = 201, description = "Entry recorded", body = EntryDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid credentials", body = ApiError),
        (status = 404, description = "Metric not found in this organisation", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "entries"
)]
pub async fn create_entry(
    State(state): State<AppState>,
    _identity: Identity,
    Path((organisation_id, metric_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<CreateEntryRequestDto>,
) -> Result<(StatusCode, Json<EntryDto>), ApiError> {
    // Validate the payload before touching the store.
    let ts = parse_entry_date(&request.date)?;
    let value = parse_entry_value(&request.value)?;

    let metrics = MetricDefinitionRepository::new(&state.db);
    if metrics
        .find_for_organisation(organisation_id, metric_id)
        .await?
        .is_none()
    {
        return Err(not_found("Metric not found in this organisation"));
    }

    let repo = EntryRepository::new(&state.db);
    let entry = repo
        .create(CreateEntryRequest {
            organisation_id,
            metric_id,
            ts,
            value,
            notes: request.notes,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(entry.into())))
}

/// Normalize a YYYY-MM-DD date string to midnight UTC of that day.
fn parse_entry_date(date: &str) -> Result<DateTimeWithTimeZone, ApiError> {
    let parsed = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
        validation_error(
            "Entry date must be a valid YYYY-MM-DD date",
            serde_json::json!({ "date": "Expected format YYYY-MM-DD" }),
        )
    })?;

    let midnight = parsed.and_time(NaiveTime::MIN);
    Ok(Utc.from_utc_datetime(&midnight).into())
}

/// Accept a JSON number or a numeric string, rejecting anything that does
/// not parse to a finite number.
fn parse_entry_value(value: &serde_json::Value) -> Result<f64, ApiError> {
    let parsed = match value {
        serde_json::Value::Number(number) => number.as_f64(),
        serde_json::Value::String(raw) => raw.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.filter(|value| value.is_finite()).ok_or_else(|| {
        validation_error(
            "Entry value must be a finite number",
            serde_json::json!({ "value": "Must parse as a finite number" }),
        )
    })
}
