//! Three-stage retrieval pipeline shared by every reply kind.
//!
//! A lookup is tried against the memory tier, then the persistent tier, then the game API.
//! The first tier that can answer wins and the answer is written back to the tiers in front
//! of it. Failures of the remote stage are returned as-is; stale data is never served in
//! place of an upstream error.

use chrono::{NaiveDateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::reply::ReplyRepository,
    error::{persistence::PersistenceWarning, Error},
    model::{
        app::AppState,
        reply::{CacheKey, CachedReply, Outcome, Reply},
    },
    util::time::is_fresh,
};

/// How the remote stage writes its result to the persistent tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WriteMode {
    /// A row was seen during the lookup.
    Update,
    /// No row was seen during the lookup.
    Insert,
    /// Unknown; check for a row at write time.
    Detect,
}

/// Result of consulting the persistent tier.
enum PersistentLookup<T> {
    Fresh(T, NaiveDateTime),
    Miss(WriteMode),
}

/// The retrieval pipeline for one reply kind at a time, borrowing the shared state.
pub struct TieredReplyCache<'a> {
    state: &'a AppState,
}

impl<'a> TieredReplyCache<'a> {
    /// Creates a new instance of [`TieredReplyCache`]
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Resolves a reply through the memory, persistent and remote tiers in order.
    ///
    /// A memory hit is returned without a freshness check. A persistent hit is returned only
    /// while it is inside the freshness window, except for kinds that never expire. On a
    /// miss in both, the reply is fetched from the game API and written to both tiers.
    ///
    /// The remote stage runs in its own task. If the caller is dropped while it is awaiting
    /// the fetch, the fetch and both cache writes still complete.
    ///
    /// # Arguments
    /// - `key` - Cache key; its kind must match `T`
    ///
    /// # Returns
    /// - `Ok(Outcome<T>)` - The reply, tagged with the tier that produced it
    /// - `Err(Error::LookupError)` - The game API has no record for the key
    /// - `Err(Error::UpstreamError)` - The game API could not be reached or rejected the request
    pub async fn get<T: Reply>(&self, key: CacheKey) -> Result<Outcome<T>, Error> {
        self.ensure_kind::<T>(&key)?;

        if let Some(cached) = self.state.caches.reply(&key) {
            if let Some(reply) = T::from_payload(cached.payload) {
                tracing::debug!("Found {} in the memory cache", key);

                return Ok(Outcome::HitMemory(reply));
            }
        }

        let write_mode = match self.lookup_persistent::<T>(&key).await {
            PersistentLookup::Fresh(reply, retrieved_at) => {
                tracing::debug!("Found fresh {} in the persistent cache", key);

                self.state.caches.put_reply(CachedReply {
                    key,
                    payload: reply.clone().into_payload(),
                    retrieved_at,
                });

                return Ok(Outcome::HitPersistent(reply));
            }
            PersistentLookup::Miss(write_mode) => write_mode,
        };

        let reply = fetch_remote::<T>(self.state.clone(), key, write_mode).await?;

        Ok(Outcome::Fetched(reply))
    }

    /// Fetches a reply from the game API regardless of what either tier holds.
    ///
    /// Both tiers are overwritten with the result. Whether a persistent row exists is
    /// checked at write time.
    ///
    /// # Returns
    /// - `Ok(T)` - The freshly fetched reply
    /// - `Err(Error)` - Same failures as the remote stage of [`Self::get`]
    pub async fn refresh<T: Reply>(&self, key: CacheKey) -> Result<T, Error> {
        self.ensure_kind::<T>(&key)?;

        fetch_remote::<T>(self.state.clone(), key, WriteMode::Detect).await
    }

    fn ensure_kind<T: Reply>(&self, key: &CacheKey) -> Result<(), Error> {
        if key.kind() != T::KIND {
            return Err(Error::InternalError(format!(
                "Requested a {} reply with cache key {}",
                T::KIND,
                key
            )));
        }

        Ok(())
    }

    async fn lookup_persistent<T: Reply>(&self, key: &CacheKey) -> PersistentLookup<T> {
        let stored = match ReplyRepository::new(&self.state.db).find(key).await {
            Ok(Some(stored)) => stored,
            Ok(None) => return PersistentLookup::Miss(WriteMode::Insert),
            Err(e) => {
                tracing::warn!(
                    "Failed to read {} from the persistent cache, treating as a miss: {}",
                    key,
                    e
                );

                return PersistentLookup::Miss(WriteMode::Detect);
            }
        };

        if T::KIND.expires() {
            let now = Utc::now().naive_utc();

            match is_fresh(stored.retrieved_at, self.state.cache_config.freshness(), now) {
                Ok(true) => {}
                Ok(false) => {
                    tracing::debug!(
                        "Persistent cache entry for {} retrieved at {} is stale",
                        key,
                        stored.retrieved_at
                    );

                    return PersistentLookup::Miss(WriteMode::Update);
                }
                Err(e) => {
                    tracing::warn!("Treating {} as stale: {}", key, e);

                    return PersistentLookup::Miss(WriteMode::Update);
                }
            }
        }

        match serde_json::from_str::<T>(&stored.data) {
            Ok(reply) if reply.is_usable() => PersistentLookup::Fresh(reply, stored.retrieved_at),
            Ok(_) => {
                tracing::warn!("Persistent cache entry for {} is not a usable reply", key);

                PersistentLookup::Miss(WriteMode::Update)
            }
            Err(e) => {
                tracing::warn!("Failed to decode persistent cache entry for {}: {}", key, e);

                PersistentLookup::Miss(WriteMode::Update)
            }
        }
    }
}

/// Remote stage: fetch, validate, populate memory, populate the persistent tier, return.
///
/// Runs on a spawned task that owns a clone of the state, so cancellation of the awaiting
/// caller does not abandon the cache writes.
async fn fetch_remote<T: Reply>(
    state: AppState,
    key: CacheKey,
    write_mode: WriteMode,
) -> Result<T, Error> {
    let task_key = key.clone();

    let handle = tokio::spawn(async move {
        let key = task_key;

        let reply: T = state.game_api.fetch(&key).await?;
        let reply = reply.validate(&key)?;
        let retrieved_at = Utc::now().naive_utc();

        tracing::debug!("Fetched {} from the game API", key);

        state.caches.put_reply(CachedReply {
            key: key.clone(),
            payload: reply.clone().into_payload(),
            retrieved_at,
        });

        persist(&state.db, &key, &reply, retrieved_at, write_mode).await;

        Ok::<T, Error>(reply)
    });

    handle.await.map_err(|e| {
        Error::InternalError(format!("Remote fetch task for {} failed: {}", key, e))
    })?
}

/// Best-effort write to the persistent tier; failures are logged and swallowed.
async fn persist<T: Reply>(
    db: &DatabaseConnection,
    key: &CacheKey,
    reply: &T,
    retrieved_at: NaiveDateTime,
    write_mode: WriteMode,
) {
    let data = match serde_json::to_string(reply) {
        Ok(data) => data,
        Err(e) => {
            tracing::error!("Failed to encode {} for the persistent cache: {}", key, e);
            return;
        }
    };

    let reply_repo = ReplyRepository::new(db);
    let target = key.kind().as_str();

    let write_mode = match write_mode {
        WriteMode::Detect => match reply_repo.exists(key).await {
            Ok(true) => WriteMode::Update,
            Ok(false) => WriteMode::Insert,
            Err(e) => {
                PersistenceWarning::new("look up", target, key.id(), e).log();
                return;
            }
        },
        write_mode => write_mode,
    };

    let result = match write_mode {
        WriteMode::Insert => match reply_repo.insert(key, data.clone(), retrieved_at).await {
            Ok(()) => Ok(()),
            // Row written by a concurrent resolution since the lookup
            Err(insert_err) => match reply_repo.update(key, data, retrieved_at).await {
                Ok(0) => Err(insert_err),
                Ok(_) => Ok(()),
                Err(_) => Err(insert_err),
            },
        },
        _ => match reply_repo.update(key, data.clone(), retrieved_at).await {
            // Row removed since it was seen
            Ok(0) => reply_repo.insert(key, data, retrieved_at).await,
            Ok(_) => Ok(()),
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        let operation = match write_mode {
            WriteMode::Insert => "insert",
            _ => "update",
        };

        PersistenceWarning::new(operation, target, key.id(), e).log();
    }
}
