//! Name and stable ID resolution.
//!
//! Both directions are tiered like replies: memory, then the persistent mapping table, then
//! an upstream service. A resolved stable ID is never re-resolved while it stays cached.
//! Renames are handled by purging the cached name with [`IdentityService::invalidate_name_cache`].

use uuid::Uuid;

use crate::server::{
    data::identity::IdentityRepository,
    error::{
        lookup::LookupError,
        persistence::PersistenceWarning,
        upstream::{Upstream, UpstreamError},
        Error,
    },
    model::{app::AppState, identity::PlayerIdentity, payload::PlayerReply, reply::CacheKey},
    service::reply::TieredReplyCache,
    util::username::is_valid_username,
};

/// Name to stable ID resolution and the reverse lookup.
pub struct IdentityService<'a> {
    state: &'a AppState,
}

impl<'a> IdentityService<'a> {
    /// Creates a new instance of [`IdentityService`]
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Resolves a player name to its stable ID.
    ///
    /// The name is checked against the username predicate before any tier is consulted.
    /// The identity service is called at most once per call, and a newly discovered mapping
    /// is cached in both directions and persisted best-effort.
    ///
    /// # Arguments
    /// - `name` - Player name, matched case-insensitively
    ///
    /// # Returns
    /// - `Ok(Uuid)` - The stable ID registered to the name
    /// - `Err(Error::LookupError)` - The name is malformed or not registered
    /// - `Err(Error::UpstreamError)` - The identity service could not be reached
    pub async fn id_for(&self, name: &str) -> Result<Uuid, Error> {
        if !is_valid_username(name) {
            return Err(LookupError::InvalidUsername(name.to_string()).into());
        }

        if let Some(id) = self.state.caches.id_for(name) {
            tracing::debug!("Found ID for {} in the memory cache ({})", name, id);

            return Ok(id);
        }

        let identity_repo = IdentityRepository::new(&self.state.db);

        match identity_repo.find_by_username(name).await {
            Ok(Some(row)) => match Uuid::parse_str(&row.stable_id) {
                Ok(id) => {
                    tracing::debug!("Found ID for {} in the persistent cache ({})", name, id);
                    self.state.caches.put_identity(id, &row.username);

                    return Ok(id);
                }
                Err(e) => {
                    tracing::warn!(
                        "Ignoring identity row {} with malformed stable ID {:?}: {}",
                        row.id,
                        row.stable_id,
                        e
                    );
                }
            },
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(
                    "Failed to read identity mapping for {}, treating as a miss: {}",
                    name,
                    e
                );
            }
        }

        let profile = self
            .state
            .identity_api
            .lookup_id(name)
            .await?
            .ok_or_else(|| LookupError::PlayerNotFound(name.to_string()))?;

        tracing::debug!(
            "Found ID for {} using the identity service ({})",
            name,
            profile.id
        );

        self.state.caches.put_identity(profile.id, &profile.name);

        if let Err(e) = identity_repo.create(profile.id, &profile.name).await {
            PersistenceWarning::new("insert", "identity mapping", name, e).log();
        }

        Ok(profile.id)
    }

    /// Resolves a stable ID to the player's current name.
    ///
    /// Falls back to a forced player record fetch, bounded by the name lookup timeout. The
    /// fetched record is written to both reply tiers and the mapping is persisted.
    ///
    /// # Returns
    /// - `Ok(String)` - The player's name
    /// - `Err(Error::LookupError)` - The game API has no record, or the record has no name
    /// - `Err(Error::UpstreamError)` - The game API failed or did not answer in time
    pub async fn name_for(&self, id: Uuid) -> Result<String, Error> {
        if let Some(name) = self.state.caches.name_for(id) {
            tracing::debug!("Found name for {} in the memory cache ({})", id, name);

            return Ok(name);
        }

        let identity_repo = IdentityRepository::new(&self.state.db);

        match identity_repo.find_by_stable_id(id).await {
            Ok(Some(row)) => {
                tracing::debug!(
                    "Found name for {} in the persistent cache ({})",
                    id,
                    row.username
                );
                self.state.caches.put_name(id, &row.username);

                return Ok(row.username);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(
                    "Failed to read identity mapping for {}, treating as a miss: {}",
                    id,
                    e
                );
            }
        }

        let timeout = self.state.cache_config.name_lookup_timeout();
        let reply_cache = TieredReplyCache::new(self.state);

        let reply = tokio::time::timeout(
            timeout,
            reply_cache.refresh::<PlayerReply>(CacheKey::player(id)),
        )
        .await
        .map_err(|_| UpstreamError::Timeout {
            service: Upstream::GameApi,
            after: timeout,
        })??;

        let name = reply
            .player
            .and_then(|player| player.displayname)
            .ok_or(LookupError::PlayerRecordNotFound(id))?;

        tracing::debug!("Found name for {} using the game API ({})", id, name);

        self.state.caches.put_identity(id, &name);

        if let Err(e) = identity_repo.create(id, &name).await {
            PersistenceWarning::new("insert", "identity mapping", id.to_string(), e).log();
        }

        Ok(name)
    }

    /// Forgets the cached name for a stable ID.
    ///
    /// Only the memory tier is purged. The next [`Self::name_for`] re-derives the name from
    /// the persistent mapping table or the game API.
    pub fn invalidate_name_cache(&self, id: Uuid) {
        tracing::debug!("Invalidating cached name for {}", id);

        self.state.caches.invalidate_name(id);
    }

    /// Resolves a name to its stable ID and current canonical name.
    pub async fn identify(&self, name: &str) -> Result<PlayerIdentity, Error> {
        let id = self.id_for(name).await?;
        let canonical_name = self.name_for(id).await?;

        Ok(PlayerIdentity::new(id, canonical_name))
    }
}
