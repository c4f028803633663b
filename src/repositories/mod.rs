//! # Repository Layer
//!
//! This module contains repository implementations that encapsulate SeaORM
//! operations for database entities, providing a clean API for data access
//! scoped to one organisation.

pub mod entry;
pub mod invite;
pub mod membership;
pub mod metric_definition;
pub mod organisation;
pub mod subsidiary;

pub use entry::{CreateEntryRequest, EntryRepository, RECENT_ENTRY_LIMIT};
pub use invite::InviteRepository;
pub use membership::{CreateMembershipRequest, MembershipRepository};
pub use metric_definition::{CreateMetricRequest, MetricDefinitionRepository};
pub use organisation::{CreateOrganisationRequest, OrganisationRepository};
pub use subsidiary::SubsidiaryRepository;
