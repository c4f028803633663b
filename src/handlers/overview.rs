//! # Organisation Overview Handler
//!
//! The overview is the single aggregated load behind the organisation
//! screen: it reconciles any pending invite for the signed-in user first,
//! consults the access gate, then returns subsidiaries, metrics,
//! memberships, and invites (each newest first) together with the default
//! metric's full entry series so the first paint is complete.

use crate::access::{Access, check_access};
use crate::auth::{Identity, IdentityHeaders};
use crate::claim::reconcile_invite;
use crate::error::{ApiError, not_found};
use crate::handlers::entries::{ChartPointDto, EntryDto};
use crate::handlers::invites::InviteDto;
use crate::handlers::members::MembershipDto;
use crate::handlers::metrics::MetricDefinitionDto;
use crate::handlers::orgs::OrganisationDto;
use crate::handlers::subsidiaries::SubsidiaryDto;
use crate::repositories::{
    EntryRepository, InviteRepository, MembershipRepository, MetricDefinitionRepository,
    OrganisationRepository, SubsidiaryRepository,
};
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Aggregated organisation screen payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrganisationOverviewResponse {
    pub organisation: OrganisationDto,
    /// Subscription gate result for this organisation
    pub access: Access,
    /// Subsidiaries, newest first
    pub subsidiaries: Vec<SubsidiaryDto>,
    /// Metric definitions, newest first
    pub metrics: Vec<MetricDefinitionDto>,
    /// Memberships, newest first
    pub memberships: Vec<MembershipDto>,
    /// Invites, newest first
    pub invites: Vec<InviteDto>,
    /// Default metric selection: the first metric of the list, if any
    pub selected_metric_id: Option<Uuid>,
    /// Selected metric's full series, ascending by timestamp
    pub entries: Vec<EntryDto>,
    /// Selected metric's last ten entries, newest first
    pub recent: Vec<EntryDto>,
    /// Selected metric's chart projection
    pub chart: Vec<ChartPointDto>,
}

/// Load the aggregated organisation overview
#[utoipa::path(
    get,
    path = "/api/v1/orgs/{id}/overview",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Organisation identifier"),
        IdentityHeaders
    ),
    responses(
        (status = 200, description = "Organisation overview", body = OrganisationOverviewResponse),
        (status = 401, description = "Missing or invalid credentials", body = ApiError),
        (status = 404, description = "Organisation not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "organisations"
)]
pub async fn organisation_overview(
    State(state): State<AppState>,
    identity: Identity,
    Path(organisation_id): Path<Uuid>,
) -> Result<Json<OrganisationOverviewResponse>, ApiError> {
    let orgs = OrganisationRepository::new(&state.db);
    let organisation = orgs
        .find_by_id(organisation_id)
        .await?
        .ok_or_else(|| not_found("Organisation not found"))?;

    let access = check_access(organisation_id).await;

    // Claim any pending invite before loading the lists so the response
    // already reflects the new membership and invite state.
    reconcile_invite(&state.db, organisation_id, &identity).await?;

    let subsidiaries = SubsidiaryRepository::new(&state.db)
        .list_for_organisation(organisation_id)
        .await?;
    let metrics = MetricDefinitionRepository::new(&state.db)
        .list_for_organisation(organisation_id)
        .await?;
    let memberships = MembershipRepository::new(&state.db)
        .list_for_organisation(organisation_id)
        .await?;
    let invites = InviteRepository::new(&state.db)
        .list_for_organisation(organisation_id)
        .await?;

    // Default to the first metric of the (newest-first) list so the chart
    // is non-empty on first paint.
    let selected_metric_id = metrics.first().map(|metric| metric.id);

    let (entries, recent) = match selected_metric_id {
        Some(metric_id) => {
            let repo = EntryRepository::new(&state.db);
            (
                repo.list_for_metric(metric_id).await?,
                repo.recent_for_metric(metric_id).await?,
            )
        }
        None => (Vec::new(), Vec::new()),
    };

    let chart = entries.iter().map(ChartPointDto::from).collect();

    Ok(Json(OrganisationOverviewResponse {
        organisation: organisation.into(),
        access,
        subsidiaries: subsidiaries.into_iter().map(SubsidiaryDto::from).collect(),
        metrics: metrics.into_iter().map(MetricDefinitionDto::from).collect(),
        memberships: memberships.into_iter().map(MembershipDto::from).collect(),
        invites: invites.into_iter().map(InviteDto::from).collect(),
        selected_metric_id,
        entries: entries.into_iter().map(EntryDto::from).collect(),
        recent: recent.into_iter().map(EntryDto::from).collect(),
        chart,
    }))
}
