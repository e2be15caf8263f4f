//! Identity resolution and name invalidation endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    model::{api::ErrorDto, game::IdentityDto},
    server::{
        controller::IDENTITY_TAG,
        error::{lookup::LookupError, Error},
        model::app::AppState,
        service::identity::IdentityService,
    },
};

/// Resolve a player name to its stable ID and current name
///
/// # Responses
/// - 200 (OK): The stable ID and canonical name
/// - 404 (Not Found): The name is malformed or not registered
/// - 503 (Service Unavailable): The identity service or game API could not be reached
#[utoipa::path(
    get,
    path = "/api/identity/{name}",
    tag = IDENTITY_TAG,
    params(("name" = String, Path, description = "Player name, case-insensitive")),
    responses(
        (status = 200, description = "Resolved identity", body = IdentityDto),
        (status = 404, description = "Player not found", body = ErrorDto),
        (status = 503, description = "Upstream unavailable", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_identity(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let identity = IdentityService::new(&state).identify(&name).await?;

    let dto = IdentityDto {
        id: identity.id.to_string(),
        name: identity.name,
    };

    Ok((StatusCode::OK, Json(dto)))
}

/// Forget the cached name for a stable ID
///
/// Used after a player renames. The next lookup re-derives the name.
///
/// # Responses
/// - 204 (No Content): The cached name, if any, was dropped
/// - 404 (Not Found): The ID is not a valid UUID
#[utoipa::path(
    delete,
    path = "/api/identity/{id}/name",
    tag = IDENTITY_TAG,
    params(("id" = String, Path, description = "Stable player ID")),
    responses(
        (status = 204, description = "Cached name dropped"),
        (status = 404, description = "Player not found", body = ErrorDto)
    ),
)]
pub async fn invalidate_identity_name(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let id = Uuid::parse_str(&id).map_err(|_| LookupError::PlayerNotFound(id.clone()))?;

    IdentityService::new(&state).invalidate_name_cache(id);

    Ok(StatusCode::NO_CONTENT)
}
