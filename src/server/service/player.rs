//! Player record resolution.

use uuid::Uuid;

use crate::server::{
    error::Error,
    model::{app::AppState, payload::PlayerReply, reply::CacheKey},
    service::{identity::IdentityService, reply::TieredReplyCache},
};

/// Player record lookups by name or stable ID.
pub struct PlayerService<'a> {
    state: &'a AppState,
}

impl<'a> PlayerService<'a> {
    /// Creates a new instance of [`PlayerService`]
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Resolves a player name to the player's game record.
    ///
    /// # Returns
    /// - `Ok(PlayerReply)` - A usable reply from whichever tier answered first
    /// - `Err(Error::LookupError)` - The name is malformed or unknown, or the game API has no record
    /// - `Err(Error::UpstreamError)` - An upstream service could not be reached
    pub async fn resolve_player(&self, name: &str) -> Result<PlayerReply, Error> {
        let id = IdentityService::new(self.state).id_for(name).await?;

        self.resolve_player_by_id(id).await
    }

    /// Resolves a stable ID to the player's game record, skipping identity resolution.
    pub async fn resolve_player_by_id(&self, id: Uuid) -> Result<PlayerReply, Error> {
        let outcome = TieredReplyCache::new(self.state)
            .get::<PlayerReply>(CacheKey::player(id))
            .await?;

        tracing::debug!("Resolved player {} from the {} tier", id, outcome.tier());

        Ok(outcome.into_inner())
    }

    /// Fetches a player's record from the game API, bypassing both cache tiers.
    ///
    /// For callers that must act on current data, such as verifying a linked account. The
    /// fetched record replaces what both tiers held.
    pub async fn refresh_player(&self, name: &str) -> Result<PlayerReply, Error> {
        let id = IdentityService::new(self.state).id_for(name).await?;

        TieredReplyCache::new(self.state)
            .refresh::<PlayerReply>(CacheKey::player(id))
            .await
    }
}
