//! # Server Configuration
//!
//! This module contains the server setup and configuration for the Metricboard API.

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use sea_orm::DatabaseConnection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::auth;
use crate::config::AppConfig;
use crate::handlers;
use crate::telemetry;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DatabaseConnection,
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    let protected = Router::new()
        .route(
            "/orgs",
            get(handlers::orgs::list_organisations).post(handlers::orgs::create_organisation),
        )
        .route(
            "/orgs/{id}/overview",
            get(handlers::overview::organisation_overview),
        )
        .route(
            "/orgs/{id}/subsidiaries",
            post(handlers::subsidiaries::create_subsidiary),
        )
        .route(
            "/orgs/{id}/metrics",
            post(handlers::metrics::create_metric_definition),
        )
        .route(
            "/orgs/{id}/metrics/{metric_id}/entries",
            get(handlers::entries::list_entries).post(handlers::entries::create_entry),
        )
        .route("/orgs/{id}/invites", post(handlers::invites::create_invite))
        .route(
            "/orgs/{id}/invites/{invite_id}/revoke",
            post(handlers::invites::revoke_invite),
        )
        .route("/orgs/{id}/members", delete(handlers::members::remove_member))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state.config),
            auth::auth_middleware,
        ));

    Router::new()
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        .nest("/api/v1", protected)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(telemetry::trace_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Starts the server with the given configuration
pub async fn run_server(config: AppConfig, db: DatabaseConnection) -> anyhow::Result<()> {
    let addr = config
        .bind_addr()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;
    let profile = config.profile.clone();

    let state = AppState {
        config: Arc::new(config),
        db,
    };
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, %profile, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz,
        crate::handlers::orgs::list_organisations,
        crate::handlers::orgs::create_organisation,
        crate::handlers::overview::organisation_overview,
        crate::handlers::subsidiaries::create_subsidiary,
        crate::handlers::metrics::create_metric_definition,
        crate::handlers::entries::list_entries,
        crate::handlers::entries::create_entry,
        crate::handlers::invites::create_invite,
        crate::handlers::invites::revoke_invite,
        crate::handlers::members::remove_member,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::handlers::HealthResponse,
            crate::error::ApiError,
            crate::access::Access,
            crate::handlers::orgs::OrganisationDto,
            crate::handlers::orgs::OrganisationsResponse,
            crate::handlers::orgs::CreateOrganisationRequestDto,
            crate::handlers::overview::OrganisationOverviewResponse,
            crate::handlers::subsidiaries::SubsidiaryDto,
            crate::handlers::subsidiaries::CreateSubsidiaryRequestDto,
            crate::handlers::metrics::MetricDefinitionDto,
            crate::handlers::metrics::CreateMetricRequestDto,
            crate::handlers::entries::EntryDto,
            crate::handlers::entries::ChartPointDto,
            crate::handlers::entries::MetricEntriesResponse,
            crate::handlers::entries::CreateEntryRequestDto,
            crate::handlers::invites::InviteDto,
            crate::handlers::invites::CreateInviteRequestDto,
            crate::handlers::invites::InviteResponse,
            crate::handlers::members::MembershipDto,
            crate::handlers::members::RemoveMemberRequestDto,
        )
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Metricboard API",
        description = "Multi-tenant API for tracking business metrics",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
