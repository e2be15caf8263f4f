//! Error types for the Mimir server application.
//!
//! This module provides the error taxonomy for the retrieval engine. Domain errors are split
//! by concern (configuration, lookups, upstream services, persistence) and aggregated into a
//! single [`Error`] type with `thiserror`. Every error can be classified into an [`ErrorKind`]
//! so callers can render "nothing here" and "try again later" differently.

pub mod config;
pub mod kind;
pub mod lookup;
pub mod persistence;
pub mod upstream;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{config::ConfigError, lookup::LookupError, upstream::UpstreamError},
};

/// Main error type for the Mimir server application.
///
/// Aggregates all domain-specific error types and external library errors into a single
/// type. `#[from]` conversions allow `?` propagation from repositories, clients and
/// serialization. The `IntoResponse` implementation maps errors to HTTP responses for API
/// consumers.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Lookup errors (authoritative absence, no usable profile)
/// - Upstream errors (game API or identity service unreachable, throttled or rejecting)
/// - Database errors
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// The requested player, profile or guild does not exist.
    #[error(transparent)]
    LookupError(#[from] LookupError),
    /// The game API or the identity service could not provide an answer.
    #[error(transparent)]
    UpstreamError(#[from] UpstreamError),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug in Mimir's code.
    #[error("Internal error with Mimir's code, please open a GitHub issue as this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 404 Not Found - For lookups that are authoritatively absent or have no usable profile
/// - 503 Service Unavailable - For upstream transport failures, throttling and timeouts
/// - 500 Internal Server Error - For all other errors (with error logging)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::LookupError(err) => err.into_response(),
            Self::UpstreamError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic "Internal server error" message to the
/// client to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
