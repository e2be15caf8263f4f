//! Process startup: database connection, upstream clients and shared state.

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::server::{
    client::{GameApiClient, IdentityClient},
    config::Config,
    error::Error,
    model::app::AppState,
};

/// Build the game API and identity service clients
pub fn build_clients(config: &Config) -> Result<(GameApiClient, IdentityClient), Error> {
    let game_api = GameApiClient::new(
        &config.game_api_url,
        &config.game_api_key,
        &config.user_agent,
    )?;
    let identity_api = IdentityClient::new(&config.identity_api_url, &config.user_agent)?;

    Ok((game_api, identity_api))
}

/// Connect to the database
///
/// The four cache tables are expected to exist already.
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Ok(db)
}

/// Build the shared application state, including the memory tier
pub async fn build_state(config: &Config) -> Result<AppState, Error> {
    let (game_api, identity_api) = build_clients(config)?;
    let db = connect_to_database(config).await?;

    Ok(AppState::new(
        db,
        game_api,
        identity_api,
        config.cache.clone(),
    ))
}
