//! Selected profile resolution.
//!
//! A player can own several profiles; the selected one is the profile the player saved most
//! recently. Every referenced profile is fetched concurrently through the tiered cache and
//! the results are reduced once all of them have finished or failed.

use std::{future::Future, time::Duration};

use futures::future::join_all;
use uuid::Uuid;

use crate::server::{
    error::{
        lookup::LookupError,
        upstream::{Upstream, UpstreamError},
        Error,
    },
    model::{
        app::AppState,
        payload::{PlayerReply, ProfileRef, ProfileReply},
        reply::CacheKey,
    },
    service::{identity::IdentityService, reply::TieredReplyCache},
};

/// The profile a player last saved on, with the values it was selected by.
#[derive(Clone, Debug)]
pub struct SelectedProfile {
    /// Stable ID of the player the name resolved to
    pub id: Uuid,
    /// The player's last save on this profile, `None` when the profile has no timestamp for them
    pub last_save: Option<i64>,
    /// The selected reply with its label in `cute_name`
    pub reply: ProfileReply,
}

/// Selected profile lookups.
pub struct ProfileService<'a> {
    state: &'a AppState,
}

impl<'a> ProfileService<'a> {
    /// Creates a new instance of [`ProfileService`]
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Resolves the profile a player last saved on.
    ///
    /// Each profile fetch is bounded by the profile fetch timeout. A profile that fails,
    /// times out or is unusable is dropped from the selection; only when every profile is
    /// dropped does the lookup fail. The selected reply carries its profile's label in
    /// `cute_name`.
    ///
    /// # Arguments
    /// - `name` - Player name
    ///
    /// # Returns
    /// - `Ok(ProfileReply)` - The profile with the greatest `last_save` for this player
    /// - `Err(Error::LookupError(NoProfilesFound))` - The player has no loadable profile
    /// - `Err(Error::LookupError)` - The name is malformed or unknown
    /// - `Err(Error::UpstreamError)` - The identity or player lookup failed upstream
    pub async fn resolve_selected_profile(&self, name: &str) -> Result<ProfileReply, Error> {
        Ok(self.select_profile(name).await?.reply)
    }

    /// Same as [`Self::resolve_selected_profile`], also returning the player's ID and the
    /// `last_save` the profile won with.
    pub async fn select_profile(&self, name: &str) -> Result<SelectedProfile, Error> {
        let id = IdentityService::new(self.state).id_for(name).await?;
        let reply_cache = TieredReplyCache::new(self.state);

        let player = match reply_cache.get::<PlayerReply>(CacheKey::player(id)).await {
            Ok(outcome) => outcome.into_inner(),
            Err(Error::LookupError(LookupError::PlayerRecordNotFound(_))) => {
                return Err(LookupError::NoProfilesFound(name.to_string()).into())
            }
            Err(e) => return Err(e),
        };

        let profile_refs = player
            .player
            .as_ref()
            .map(|record| record.profile_refs())
            .unwrap_or_default();

        let timeout = self.state.cache_config.profile_fetch_timeout();
        let fetches = profile_refs.iter().map(|profile_ref| {
            bounded(
                reply_cache.get::<ProfileReply>(CacheKey::profile(&profile_ref.profile_id)),
                timeout,
            )
        });

        let results = join_all(fetches).await;

        let candidates: Vec<(ProfileRef, ProfileReply)> = profile_refs
            .into_iter()
            .zip(results)
            .filter_map(|(profile_ref, result)| match result {
                Ok(outcome) => Some((profile_ref, outcome.into_inner())),
                Err(e) => {
                    tracing::warn!(
                        "Dropping profile {} of {} from selection: {}",
                        profile_ref.profile_id,
                        name,
                        e
                    );
                    None
                }
            })
            .collect();

        let member_key = id.simple().to_string();
        let last_saves: Vec<i64> = candidates
            .iter()
            .map(|(_, reply)| {
                reply
                    .profile
                    .as_ref()
                    .map(|profile| profile.last_save_of(&member_key))
                    .unwrap_or(i64::MIN)
            })
            .collect();

        let Some(selected) = select_latest(last_saves.iter().copied()) else {
            tracing::debug!("Found no valid profiles for {}", name);

            return Err(LookupError::NoProfilesFound(name.to_string()).into());
        };

        let Some((profile_ref, mut reply)) = candidates.into_iter().nth(selected) else {
            return Err(Error::InternalError(format!(
                "Selected profile index {} is out of range",
                selected
            )));
        };

        if let Some(profile) = reply.profile.as_mut() {
            profile.cute_name = profile_ref.cute_name;

            tracing::debug!(
                "Selected profile {} ({}) for {}",
                profile.profile_id,
                profile.cute_name.as_deref().unwrap_or("unnamed"),
                name
            );
        }

        let last_save = match last_saves[selected] {
            i64::MIN => None,
            last_save => Some(last_save),
        };

        Ok(SelectedProfile {
            id,
            last_save,
            reply,
        })
    }
}

/// Runs a fetch under a deadline; running out of time is an upstream timeout.
async fn bounded<F, T>(fetch: F, timeout: Duration) -> Result<T, Error>
where
    F: Future<Output = Result<T, Error>>,
{
    match tokio::time::timeout(timeout, fetch).await {
        Ok(result) => result,
        Err(_) => Err(UpstreamError::Timeout {
            service: Upstream::GameApi,
            after: timeout,
        }
        .into()),
    }
}

/// Index of the greatest value; ties keep the earliest.
fn select_latest<I>(last_saves: I) -> Option<usize>
where
    I: IntoIterator<Item = i64>,
{
    let mut selected: Option<(usize, i64)> = None;

    for (index, last_save) in last_saves.into_iter().enumerate() {
        match selected {
            Some((_, best)) if last_save <= best => {}
            _ => selected = Some((index, last_save)),
        }
    }

    selected.map(|(index, _)| index)
}
