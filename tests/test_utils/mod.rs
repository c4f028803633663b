//! Test utilities for API testing.
//!
//! This module provides utilities for setting up in-memory SQLite databases
//! with migrations applied, building the full application router, and
//! inserting fixture data.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    body::Body,
    http::Request,
    response::Response,
};
use chrono::{TimeZone, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use serde_json::Value;
use uuid::Uuid;

use metricboard::config::AppConfig;
use metricboard::repositories::{
    CreateEntryRequest, CreateMembershipRequest, CreateMetricRequest, CreateOrganisationRequest,
    EntryRepository, InviteRepository, MembershipRepository, MetricDefinitionRepository,
    OrganisationRepository,
};
use metricboard::server::{AppState, create_app};

/// Gateway bearer token accepted by the test application.
#[allow(dead_code)]
pub const TEST_GATEWAY_TOKEN: &str = "test-gateway-token";

/// Sets up an in-memory SQLite database with all migrations applied.
#[allow(dead_code)]
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Application configuration for tests.
#[allow(dead_code)]
pub fn test_config() -> AppConfig {
    AppConfig {
        gateway_tokens: vec![TEST_GATEWAY_TOKEN.to_string()],
        ..Default::default()
    }
}

/// Builds the full application router over a fresh in-memory database.
#[allow(dead_code)]
pub async fn test_app() -> Result<(Router, DatabaseConnection)> {
    let db = setup_test_db().await?;
    let app = create_app(AppState {
        config: Arc::new(test_config()),
        db: db.clone(),
    });
    Ok((app, db))
}

/// Builds an authenticated request carrying the forwarded identity headers.
#[allow(dead_code)]
pub fn authed_request(
    method: &str,
    uri: &str,
    user_id: &str,
    email: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {}", TEST_GATEWAY_TOKEN))
        .header("X-User-Id", user_id);

    if let Some(email) = email {
        builder = builder.header("X-User-Email", email);
    }

    match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Reads a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

/// Creates a test organisation owned by the given user.
#[allow(dead_code)]
pub async fn create_test_organisation(db: &DatabaseConnection, owner_user_id: &str) -> Result<Uuid> {
    let organisation = OrganisationRepository::new(db)
        .create(CreateOrganisationRequest {
            name: "Test Organisation".to_string(),
            owner_user_id: owner_user_id.to_string(),
        })
        .await?;
    Ok(organisation.id)
}

/// Creates a test metric definition under an organisation.
#[allow(dead_code)]
pub async fn create_test_metric(
    db: &DatabaseConnection,
    organisation_id: Uuid,
    name: &str,
) -> Result<Uuid> {
    let metric = MetricDefinitionRepository::new(db)
        .create(CreateMetricRequest {
            organisation_id,
            name: name.to_string(),
            unit: None,
        })
        .await?;
    Ok(metric.id)
}

/// Inserts an entry at midnight UTC of the given day in May 2026.
#[allow(dead_code)]
pub async fn insert_entry(
    db: &DatabaseConnection,
    organisation_id: Uuid,
    metric_id: Uuid,
    day: u32,
    value: f64,
) -> Result<i64> {
    let entry = EntryRepository::new(db)
        .create(CreateEntryRequest {
            organisation_id,
            metric_id,
            ts: Utc.with_ymd_and_hms(2026, 5, day, 0, 0, 0).unwrap().into(),
            value,
            notes: None,
        })
        .await?;
    Ok(entry.id)
}

/// Inserts a pending invite for a normalized email.
#[allow(dead_code)]
pub async fn insert_pending_invite(
    db: &DatabaseConnection,
    organisation_id: Uuid,
    email: &str,
    role: &str,
) -> Result<Uuid> {
    let invite = InviteRepository::new(db)
        .upsert_pending(organisation_id, email, role)
        .await?;
    Ok(invite.id)
}

/// Inserts a membership row directly.
#[allow(dead_code)]
pub async fn insert_membership(
    db: &DatabaseConnection,
    organisation_id: Uuid,
    user_id: Option<&str>,
    email: &str,
    role: &str,
) -> Result<Uuid> {
    let membership = MembershipRepository::new(db)
        .create(CreateMembershipRequest {
            organisation_id,
            user_id: user_id.map(str::to_string),
            email: email.to_string(),
            role: role.to_string(),
        })
        .await?;
    Ok(membership.id)
}
