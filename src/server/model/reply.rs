//! Cache keys, cached entries and retrieval outcomes shared by every reply kind.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::server::{
    error::{
        lookup::LookupError,
        upstream::{Upstream, UpstreamError},
        Error,
    },
    model::payload::{GuildReply, PlayerReply, ProfileReply},
};

/// The kind of record a cache entry holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReplyKind {
    /// Player record keyed by stable ID
    Player,
    /// Profile keyed by profile ID
    Profile,
    /// Guild roster keyed by name
    Guild,
}

impl ReplyKind {
    /// Lower-case name used in logs and persistence warnings
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Profile => "profile",
            Self::Guild => "guild",
        }
    }

    /// Whether persisted replies of this kind go stale after the freshness window.
    ///
    /// Guild rosters never do; a persisted roster is served until refreshed out of band.
    pub fn expires(&self) -> bool {
        !matches!(self, Self::Guild)
    }
}

impl fmt::Display for ReplyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed cache key; the same key addresses the memory tier and the persistent tier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    kind: ReplyKind,
    id: String,
}

impl CacheKey {
    /// Player key, the hyphenated stable ID.
    pub fn player(id: Uuid) -> Self {
        Self {
            kind: ReplyKind::Player,
            id: id.hyphenated().to_string(),
        }
    }

    /// Profile key, the profile ID as given.
    pub fn profile(profile_id: &str) -> Self {
        Self {
            kind: ReplyKind::Profile,
            id: profile_id.to_string(),
        }
    }

    /// Guild key; names are matched trimmed and case-insensitively.
    pub fn guild(name: &str) -> Self {
        Self {
            kind: ReplyKind::Guild,
            id: name.trim().to_lowercase(),
        }
    }

    /// Kind of reply the key addresses
    pub fn kind(&self) -> ReplyKind {
        self.kind
    }

    /// Row key within the kind's table
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// A decoded reply of any kind, as held by the memory tier.
#[derive(Clone, Debug)]
pub enum ReplyPayload {
    /// Player reply
    Player(PlayerReply),
    /// Profile reply
    Profile(ProfileReply),
    /// Guild reply
    Guild(GuildReply),
}

/// Memory-tier entry.
#[derive(Clone, Debug)]
pub struct CachedReply {
    /// Key the entry is stored under
    pub key: CacheKey,
    /// Decoded reply
    pub payload: ReplyPayload,
    /// When the payload was fetched from the remote tier.
    pub retrieved_at: NaiveDateTime,
}

/// Where a resolution was satisfied.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome<T> {
    /// Served by the memory tier
    HitMemory(T),
    /// Served by a fresh persistent row
    HitPersistent(T),
    /// Fetched from the game API
    Fetched(T),
}

impl<T> Outcome<T> {
    /// The resolved value, whichever tier produced it
    pub fn into_inner(self) -> T {
        match self {
            Self::HitMemory(value) | Self::HitPersistent(value) | Self::Fetched(value) => value,
        }
    }

    /// Tier name for logs
    pub fn tier(&self) -> &'static str {
        match self {
            Self::HitMemory(_) => "memory",
            Self::HitPersistent(_) => "persistent",
            Self::Fetched(_) => "remote",
        }
    }
}

/// A game API reply that can flow through the tiered cache.
///
/// Implemented by [`PlayerReply`], [`ProfileReply`] and [`GuildReply`]. The trait ties a reply
/// type to its [`ReplyKind`], to its slot in [`ReplyPayload`] and to the not-found error raised
/// when the game API answers successfully but without a record.
pub trait Reply: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The kind of record this reply carries.
    const KIND: ReplyKind;

    /// The `success` flag reported by the game API.
    fn success(&self) -> bool;

    /// Upstream explanation attached to an unsuccessful reply.
    fn cause(&self) -> Option<&str>;

    /// Whether the record itself is present.
    fn has_record(&self) -> bool;

    /// Error for a successful reply with no record under `key`.
    fn missing(key: &CacheKey) -> LookupError;

    /// Wraps the reply for the memory tier.
    fn into_payload(self) -> ReplyPayload;

    /// Recovers the typed reply, `None` when the payload is of another kind.
    fn from_payload(payload: ReplyPayload) -> Option<Self>;

    /// Successful and carrying a record; only usable replies are cached.
    fn is_usable(&self) -> bool {
        self.success() && self.has_record()
    }

    /// Checks a freshly fetched reply.
    ///
    /// # Returns
    /// - `Ok(Self)` - The reply is usable
    /// - `Err(Error::UpstreamError)` - The game API flagged the reply as unsuccessful
    /// - `Err(Error::LookupError)` - The reply is successful but the record is absent
    fn validate(self, key: &CacheKey) -> Result<Self, Error> {
        if !self.success() {
            return Err(UpstreamError::Rejected {
                service: Upstream::GameApi,
                cause: self.cause().unwrap_or("no cause given").to_string(),
            }
            .into());
        }

        if !self.has_record() {
            return Err(Self::missing(key).into());
        }

        Ok(self)
    }
}

impl Reply for PlayerReply {
    const KIND: ReplyKind = ReplyKind::Player;

    fn success(&self) -> bool {
        self.success
    }

    fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }

    fn has_record(&self) -> bool {
        self.player.is_some()
    }

    fn missing(key: &CacheKey) -> LookupError {
        match Uuid::parse_str(key.id()) {
            Ok(id) => LookupError::PlayerRecordNotFound(id),
            Err(_) => LookupError::PlayerNotFound(key.id().to_string()),
        }
    }

    fn into_payload(self) -> ReplyPayload {
        ReplyPayload::Player(self)
    }

    fn from_payload(payload: ReplyPayload) -> Option<Self> {
        match payload {
            ReplyPayload::Player(reply) => Some(reply),
            _ => None,
        }
    }
}

impl Reply for ProfileReply {
    const KIND: ReplyKind = ReplyKind::Profile;

    fn success(&self) -> bool {
        self.success
    }

    fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }

    fn has_record(&self) -> bool {
        self.profile.is_some()
    }

    fn missing(key: &CacheKey) -> LookupError {
        LookupError::ProfileNotFound(key.id().to_string())
    }

    fn into_payload(self) -> ReplyPayload {
        ReplyPayload::Profile(self)
    }

    fn from_payload(payload: ReplyPayload) -> Option<Self> {
        match payload {
            ReplyPayload::Profile(reply) => Some(reply),
            _ => None,
        }
    }
}

impl Reply for GuildReply {
    const KIND: ReplyKind = ReplyKind::Guild;

    fn success(&self) -> bool {
        self.success
    }

    fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }

    fn has_record(&self) -> bool {
        self.guild.is_some()
    }

    fn missing(key: &CacheKey) -> LookupError {
        LookupError::GuildNotFound(key.id().to_string())
    }

    fn into_payload(self) -> ReplyPayload {
        ReplyPayload::Guild(self)
    }

    fn from_payload(payload: ReplyPayload) -> Option<Self> {
        match payload {
            ReplyPayload::Guild(reply) => Some(reply),
            _ => None,
        }
    }
}
