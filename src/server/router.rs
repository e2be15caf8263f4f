//! HTTP routing and OpenAPI documentation configuration.
//!
//! Every lookup endpoint is registered here with its OpenAPI specification, and Swagger UI
//! is served at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `GET /api/player/{name}` - Player record by name
/// - `GET /api/profile/{name}` - Most recently saved profile of a player
/// - `GET /api/guild/{name}` - Guild roster by name
/// - `GET /api/identity/{name}` - Stable ID and canonical name for a player name
/// - `DELETE /api/identity/{id}/name` - Forget the cached name for a stable ID
///
/// The OpenAPI specification is available at `/api/docs/openapi.json`.
///
/// # Returns
/// An Axum `Router<AppState>` ready to have its state attached.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Mimir", description = "Mimir game-data lookup API"), tags(
        (name = controller::LOOKUP_TAG, description = "Player, profile and guild lookups"),
        (name = controller::IDENTITY_TAG, description = "Name and stable ID resolution"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::player::get_player))
        .routes(routes!(controller::profile::get_profile))
        .routes(routes!(controller::guild::get_guild))
        .routes(routes!(controller::identity::get_identity))
        .routes(routes!(controller::identity::invalidate_identity_name))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
