//! Memory tier shared by every service.
//!
//! A single [`CacheManager`] is built when the process starts and carried in `AppState`.
//! Clones share the same underlying caches.

use std::time::{Duration, Instant};

use chrono::Utc;
use moka::{sync::Cache, Expiry};
use uuid::Uuid;

use crate::server::{
    config::CacheConfig,
    model::reply::{CacheKey, CachedReply},
    util::time::remaining_freshness,
};

/// Per-entry expiry for replies.
///
/// An entry expires after `idle` without access, and never outlives the freshness window
/// measured from when its payload was fetched.
struct ReplyExpiry {
    idle: Duration,
    freshness: Duration,
}

impl ReplyExpiry {
    fn lifetime(&self, reply: &CachedReply) -> Duration {
        if !reply.key.kind().expires() {
            return self.idle;
        }

        let remaining =
            remaining_freshness(reply.retrieved_at, self.freshness, Utc::now().naive_utc());

        self.idle.min(remaining)
    }
}

impl Expiry<CacheKey, CachedReply> for ReplyExpiry {
    fn expire_after_create(
        &self,
        _key: &CacheKey,
        value: &CachedReply,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(self.lifetime(value))
    }

    fn expire_after_read(
        &self,
        _key: &CacheKey,
        value: &CachedReply,
        _read_at: Instant,
        _duration_until_expiry: Option<Duration>,
        _last_modified_at: Instant,
    ) -> Option<Duration> {
        Some(self.lifetime(value))
    }

    fn expire_after_update(
        &self,
        _key: &CacheKey,
        value: &CachedReply,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(self.lifetime(value))
    }
}

/// The memory tier: decoded replies plus both directions of the identity mapping.
///
/// Clones share the underlying caches.
#[derive(Clone)]
pub struct CacheManager {
    replies: Cache<CacheKey, CachedReply>,
    /// Lower-cased name to stable ID.
    ids: Cache<String, Uuid>,
    /// Stable ID to name; purged by [`CacheManager::invalidate_name`] on rebinds.
    names: Cache<Uuid, String>,
}

impl CacheManager {
    /// Builds the caches sized and timed by `config`
    pub fn new(config: &CacheConfig) -> Self {
        let replies = Cache::builder()
            .max_capacity(config.reply_capacity)
            .expire_after(ReplyExpiry {
                idle: config.reply_idle(),
                freshness: config.freshness(),
            })
            .build();

        let ids = Cache::builder()
            .max_capacity(config.identity_capacity)
            .time_to_idle(config.identity_idle())
            .build();

        let names = Cache::builder()
            .max_capacity(config.identity_capacity)
            .time_to_idle(config.identity_idle())
            .build();

        Self {
            replies,
            ids,
            names,
        }
    }

    /// Cached reply for a key, if it has neither idled out nor gone stale
    pub fn reply(&self, key: &CacheKey) -> Option<CachedReply> {
        self.replies.get(key)
    }

    /// Caches a reply under its own key, replacing any previous entry
    pub fn put_reply(&self, reply: CachedReply) {
        self.replies.insert(reply.key.clone(), reply);
    }

    /// Stable ID cached for a name, matched case-insensitively.
    pub fn id_for(&self, name: &str) -> Option<Uuid> {
        self.ids.get(&name.to_lowercase())
    }

    /// Name cached for a stable ID
    pub fn name_for(&self, id: Uuid) -> Option<String> {
        self.names.get(&id)
    }

    /// Caches a resolved identity in both directions.
    pub fn put_identity(&self, id: Uuid, name: &str) {
        self.ids.insert(name.to_lowercase(), id);
        self.names.insert(id, name.to_string());
    }

    /// Caches a name for a stable ID without touching the name to ID direction
    pub fn put_name(&self, id: Uuid, name: &str) {
        self.names.insert(id, name.to_string());
    }

    /// Drops the cached name for `id`; the name to ID direction is left untouched.
    pub fn invalidate_name(&self, id: Uuid) {
        self.names.invalidate(&id);
    }
}
