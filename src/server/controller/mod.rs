//! HTTP controller endpoints for the Mimir lookup API.
//!
//! Controllers are thin: they call a service, convert the reply into a DTO from
//! [`crate::model::game`] and let [`crate::server::error::Error`] pick the status code for
//! failures. Each handler carries a utoipa path so it appears in the OpenAPI document.

pub mod guild;
pub mod identity;
pub mod player;
pub mod profile;

/// OpenAPI tag for player, profile and guild lookups.
pub static LOOKUP_TAG: &str = "lookup";
/// OpenAPI tag for identity resolution.
pub static IDENTITY_TAG: &str = "identity";
