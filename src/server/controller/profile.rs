//! Selected profile endpoint.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{api::ErrorDto, game::ProfileDto},
    server::{
        controller::LOOKUP_TAG,
        error::Error,
        model::app::AppState,
        service::profile::ProfileService,
    },
};

/// Get the profile a player most recently saved on
///
/// All of the player's profiles are loaded concurrently; profiles that fail to load are
/// skipped.
///
/// # Responses
/// - 200 (OK): The selected profile
/// - 404 (Not Found): The player is unknown or none of their profiles could be loaded
/// - 503 (Service Unavailable): The game API or identity service could not be reached
#[utoipa::path(
    get,
    path = "/api/profile/{name}",
    tag = LOOKUP_TAG,
    params(("name" = String, Path, description = "Player name")),
    responses(
        (status = 200, description = "Selected profile", body = ProfileDto),
        (status = 404, description = "Player or profiles not found", body = ErrorDto),
        (status = 503, description = "Upstream unavailable", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let selected = ProfileService::new(&state).select_profile(&name).await?;

    let Some(profile) = selected.reply.profile else {
        return Err(Error::InternalError(format!(
            "Selected profile reply for {:?} has no record",
            name
        )));
    };

    let dto = ProfileDto {
        member_count: profile.members.len(),
        profile_id: profile.profile_id,
        label: profile.cute_name,
        last_save: selected.last_save,
    };

    Ok((StatusCode::OK, Json(dto)))
}
