//! Database model type aliases.
//!
//! Convenient aliases for the SeaORM entity models so repositories and services do not
//! import from the `entity` crate directly.

/// Type alias for a name to stable ID mapping row.
///
/// # Fields (from `entity::player_identity::Model`)
/// - `id` - Primary key; the highest ID for a name or stable ID is the current mapping
/// - `stable_id` - Hyphenated player UUID
/// - `username` - Name as reported by the identity service
/// - `username_key` - Lower-cased name used for lookups
/// - `created_at` - Timestamp when the mapping was discovered
pub type PlayerIdentityModel = entity::player_identity::Model;

/// Type alias for a persisted player reply.
///
/// # Fields (from `entity::player_reply::Model`)
/// - `stable_id` - Primary key, hyphenated player UUID
/// - `data` - Reply JSON as returned by the game API
/// - `created_at` - Timestamp when the row was first written
/// - `retrieved_at` - Timestamp of the fetch that produced `data`
pub type PlayerReplyModel = entity::player_reply::Model;

/// Type alias for a persisted profile reply, keyed by `profile_id`.
pub type ProfileReplyModel = entity::profile_reply::Model;

/// Type alias for a persisted guild reply, keyed by the trimmed lower-cased `name_key`.
pub type GuildReplyModel = entity::guild_reply::Model;
