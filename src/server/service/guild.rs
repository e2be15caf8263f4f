//! Guild roster resolution.

use crate::server::{
    error::{lookup::LookupError, Error},
    model::{app::AppState, payload::GuildReply, reply::CacheKey},
    service::reply::TieredReplyCache,
};

/// Guild roster lookups.
///
/// Guilds go through the same tiers as other replies, keyed by the trimmed lower-cased name,
/// but a persisted roster never goes stale. Out-of-band refreshers call
/// [`GuildService::refresh_guild`] to replace it.
pub struct GuildService<'a> {
    state: &'a AppState,
}

impl<'a> GuildService<'a> {
    /// Creates a new instance of [`GuildService`]
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Resolves a guild by name.
    ///
    /// # Returns
    /// - `Ok(GuildReply)` - A usable reply from whichever tier answered first
    /// - `Err(Error::LookupError(GuildNotFound))` - The name is blank or no such guild exists
    /// - `Err(Error::UpstreamError)` - The game API could not be reached
    pub async fn resolve_guild(&self, name: &str) -> Result<GuildReply, Error> {
        let key = guild_key(name)?;

        let outcome = TieredReplyCache::new(self.state)
            .get::<GuildReply>(key)
            .await?;

        tracing::debug!("Resolved guild {:?} from the {} tier", name, outcome.tier());

        Ok(outcome.into_inner())
    }

    /// Fetches a guild from the game API and replaces both cached copies.
    pub async fn refresh_guild(&self, name: &str) -> Result<GuildReply, Error> {
        let key = guild_key(name)?;

        TieredReplyCache::new(self.state)
            .refresh::<GuildReply>(key)
            .await
    }
}

fn guild_key(name: &str) -> Result<CacheKey, Error> {
    if name.trim().is_empty() {
        return Err(LookupError::GuildNotFound(name.to_string()).into());
    }

    Ok(CacheKey::guild(name))
}
