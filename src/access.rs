//! Access gate for organisation-level subscription checks.
//!
//! The gate is the integration point for future subscription/payment
//! verification. It currently always grants access; the overview handler
//! consults it on every organisation load so wiring real billing in later
//! is a single-module change.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Result of an access check for one organisation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Access {
    /// Whether the organisation's subscription grants access
    pub active: bool,
    /// Reason access was denied, when it was
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Check subscription/paywall status for an organisation.
pub async fn check_access(_organisation_id: Uuid) -> Access {
    Access {
        active: true,
        reason: None,
    }
}
