//! Upstream errors: the game API or the identity service could not answer.
//!
//! These are transient from the caller's point of view. Mimir performs no automatic retry;
//! the error is returned as-is and retry policy is left to the caller.

use std::{fmt, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// The remote service an [`UpstreamError`] originated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Upstream {
    /// Player, profile and guild records.
    GameApi,
    /// Name to stable ID resolution.
    IdentityService,
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GameApi => write!(f, "game API"),
            Self::IdentityService => write!(f, "identity service"),
        }
    }
}

/// A transient failure talking to an upstream service.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Connection, TLS or request timeout failure before a response arrived.
    #[error("Failed to reach the {service}: {source}")]
    Transport {
        /// Service that was called
        service: Upstream,
        /// Client failure
        #[source]
        source: reqwest::Error,
    },
    /// A response arrived with a status code that has no defined meaning for the request.
    #[error("The {service} responded with unexpected status {status}")]
    Status {
        /// Service that was called
        service: Upstream,
        /// HTTP status code
        status: u16,
    },
    /// HTTP 429.
    #[error("The {service} is rate limiting requests")]
    RateLimited {
        /// Service that was called
        service: Upstream,
    },
    /// The game API answered but flagged the reply as unsuccessful.
    #[error("The {service} rejected the request: {cause}")]
    Rejected {
        /// Service that was called
        service: Upstream,
        /// `cause` reported with the reply
        cause: String,
    },
    /// No answer within the per-call deadline.
    #[error("The {service} did not respond within {after:?}")]
    Timeout {
        /// Service that was called
        service: Upstream,
        /// Deadline that elapsed
        after: Duration,
    },
    /// The response body could not be decoded.
    #[error("The {service} returned a payload that could not be decoded: {source}")]
    InvalidPayload {
        /// Service that was called
        service: Upstream,
        /// Decoding failure
        #[source]
        source: serde_json::Error,
    },
}

impl IntoResponse for UpstreamError {
    fn into_response(self) -> Response {
        tracing::warn!("{}", self);

        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorDto {
                error: "The game service is temporarily unavailable, please try again later."
                    .to_string(),
            }),
        )
            .into_response()
    }
}
