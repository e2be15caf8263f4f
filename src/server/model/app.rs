//! Application state shared across handlers.

use sea_orm::DatabaseConnection;

use crate::server::{
    client::{GameApiClient, IdentityClient},
    config::CacheConfig,
    service::cache::CacheManager,
};

/// Shared state handed to every service and controller.
///
/// Cloning is cheap; clones share the connection pool, the HTTP clients and the memory tier.
#[derive(Clone)]
pub struct AppState {
    /// Persistent tier connection pool
    pub db: DatabaseConnection,
    /// Game API client
    pub game_api: GameApiClient,
    /// Identity service client
    pub identity_api: IdentityClient,
    /// Memory tier
    pub caches: CacheManager,
    /// Freshness window, memory tier sizing and call deadlines
    pub cache_config: CacheConfig,
}

impl AppState {
    /// Builds the state and the memory tier it owns.
    ///
    /// # Arguments
    /// - `db` - Connection pool for the persistent tier
    /// - `game_api` - Client for player, profile and guild records
    /// - `identity_api` - Client for name to stable ID resolution
    /// - `cache_config` - Memory tier sizing, freshness window and call deadlines
    pub fn new(
        db: DatabaseConnection,
        game_api: GameApiClient,
        identity_api: IdentityClient,
        cache_config: CacheConfig,
    ) -> Self {
        Self {
            db,
            game_api,
            identity_api,
            caches: CacheManager::new(&cache_config),
            cache_config,
        }
    }
}
