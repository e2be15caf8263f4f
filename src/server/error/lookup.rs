//! Lookup errors: authoritative absence of the requested data.
//!
//! These errors are terminal. Retrying them will not produce a different answer until the
//! upstream data changes, so callers render them as "nothing here" rather than as a
//! transient failure.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::model::api::ErrorDto;

/// Authoritative absence of a player, profile or guild.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The name failed the username validity predicate; no tier was consulted.
    #[error("{0:?} is not a valid player name")]
    InvalidUsername(String),
    /// The identity service has no player registered under this name.
    #[error("Failed to find a player with the name {0:?}")]
    PlayerNotFound(String),
    /// The game API has no player record for this stable ID.
    #[error("Failed to find a player record for ID {0}")]
    PlayerRecordNotFound(Uuid),
    /// The game API has no profile with this ID.
    #[error("Failed to find a profile with the ID {0:?}")]
    ProfileNotFound(String),
    /// The game API has no guild with this name.
    #[error("Failed to find a guild with the name {0:?}")]
    GuildNotFound(String),
    /// The player resolved but none of their profiles could be loaded.
    #[error("Failed to find any valid profiles for {0:?}")]
    NoProfilesFound(String),
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let message = match self {
            Self::NoProfilesFound(_) => "No profiles found for this player",
            Self::GuildNotFound(_) => "Guild not found",
            Self::ProfileNotFound(_) => "Profile not found",
            _ => "Player not found",
        };

        (
            StatusCode::NOT_FOUND,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
