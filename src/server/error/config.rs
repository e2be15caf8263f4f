//! Startup configuration errors.

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::server::error::InternalServerError;

/// Errors raised while reading the environment or assembling clients at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required variable such as `DATABASE_URL` or `GAME_API_KEY` is unset.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
    /// A variable is set but cannot be used (bad URL, bad socket address, empty key).
    #[error("Invalid value for environment variable {var}: {reason}")]
    InvalidEnvValue {
        /// Variable name
        var: String,
        /// Why the value was refused
        reason: String,
    },
    /// The HTTP client for an upstream service could not be constructed.
    #[error("Failed to build HTTP client for {service}: {source}")]
    HttpClient {
        /// Service the client was for
        service: &'static str,
        /// Builder failure
        #[source]
        source: reqwest::Error,
    },
}

impl IntoResponse for ConfigError {
    fn into_response(self) -> Response {
        InternalServerError(self).into_response()
    }
}
