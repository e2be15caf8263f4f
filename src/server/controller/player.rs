//! Player lookup endpoint.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    model::{
        api::ErrorDto,
        game::{PlayerDto, ProfileRefDto},
    },
    server::{
        controller::LOOKUP_TAG, error::Error, model::app::AppState,
        service::player::PlayerService,
    },
};

/// Get a player's game record by name
///
/// # Responses
/// - 200 (OK): The player's record, with the profiles it references
/// - 404 (Not Found): The name is malformed, unregistered, or has no game record
/// - 503 (Service Unavailable): The game API or identity service could not be reached
#[utoipa::path(
    get,
    path = "/api/player/{name}",
    tag = LOOKUP_TAG,
    params(("name" = String, Path, description = "Player name")),
    responses(
        (status = 200, description = "Player record", body = PlayerDto),
        (status = 404, description = "Player not found", body = ErrorDto),
        (status = 503, description = "Upstream unavailable", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_player(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let reply = PlayerService::new(&state).resolve_player(&name).await?;

    let Some(player) = reply.player else {
        return Err(Error::InternalError(format!(
            "Usable player reply for {:?} has no record",
            name
        )));
    };

    let profiles = player
        .profile_refs()
        .into_iter()
        .map(|profile_ref| ProfileRefDto {
            profile_id: profile_ref.profile_id,
            label: profile_ref.cute_name,
        })
        .collect();

    // The game API reports IDs without hyphens
    let id = Uuid::parse_str(&player.uuid)
        .map(|id| id.to_string())
        .unwrap_or_else(|_| player.uuid.clone());

    let dto = PlayerDto {
        id,
        name: player.displayname,
        profiles,
    };

    Ok((StatusCode::OK, Json(dto)))
}
