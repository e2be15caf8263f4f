//! Guild lookup endpoint.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{api::ErrorDto, game::GuildDto},
    server::{
        controller::LOOKUP_TAG, error::Error, model::app::AppState,
        service::guild::GuildService,
    },
};

/// Get a guild's roster by name
///
/// # Responses
/// - 200 (OK): The guild and its member count
/// - 404 (Not Found): The name is blank or no such guild exists
/// - 503 (Service Unavailable): The game API could not be reached
#[utoipa::path(
    get,
    path = "/api/guild/{name}",
    tag = LOOKUP_TAG,
    params(("name" = String, Path, description = "Guild name, case-insensitive")),
    responses(
        (status = 200, description = "Guild roster", body = GuildDto),
        (status = 404, description = "Guild not found", body = ErrorDto),
        (status = 503, description = "Upstream unavailable", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_guild(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let reply = GuildService::new(&state).resolve_guild(&name).await?;

    let Some(guild) = reply.guild else {
        return Err(Error::InternalError(format!(
            "Usable guild reply for {:?} has no record",
            name
        )));
    };

    let dto = GuildDto {
        id: guild.id,
        name: guild.name,
        member_count: guild.members.len(),
    };

    Ok((StatusCode::OK, Json(dto)))
}
