//! # Data Models
//!
//! This module contains all the data models used throughout the Metricboard API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod entry;
pub mod invite;
pub mod membership;
pub mod metric_definition;
pub mod organisation;
pub mod subsidiary;

pub use entry::Entity as Entry;
pub use invite::Entity as Invite;
pub use membership::Entity as Membership;
pub use metric_definition::Entity as MetricDefinition;
pub use organisation::Entity as Organisation;
pub use subsidiary::Entity as Subsidiary;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "metricboard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
