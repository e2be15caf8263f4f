//! Game API reply bodies.
//!
//! Builders return `serde_json::Value` in the shape the game API answers with, so the same
//! body can be served by a mock endpoint or persisted as a cached row.

use serde_json::{json, Map, Value};
use uuid::Uuid;

/// Create a successful player reply.
///
/// # Arguments
/// - `id` - Stable ID of the player, reported undashed like the game API does
/// - `name` - Display name
/// - `profiles` - `(profile_id, cute_name)` references, in listing order
///
/// # Returns
/// - `Value` - `{"success": true, "player": {...}}`
pub fn player(id: Uuid, name: &str, profiles: &[(&str, &str)]) -> Value {
    let mut refs = Map::new();
    for (profile_id, cute_name) in profiles {
        refs.insert(
            profile_id.to_string(),
            json!({ "profile_id": profile_id, "cute_name": cute_name }),
        );
    }

    json!({
        "success": true,
        "player": {
            "uuid": id.simple().to_string(),
            "displayname": name,
            "stats": {
                "SkyBlock": { "profiles": refs }
            }
        }
    })
}

/// Create a successful profile reply.
///
/// # Arguments
/// - `profile_id` - Profile ID
/// - `members` - `(member id, last_save)` pairs; `None` omits the `last_save` field
pub fn profile(profile_id: &str, members: &[(Uuid, Option<i64>)]) -> Value {
    let mut member_map = Map::new();
    for (id, last_save) in members {
        let view = match last_save {
            Some(last_save) => json!({ "last_save": last_save }),
            None => json!({}),
        };
        member_map.insert(id.simple().to_string(), view);
    }

    json!({
        "success": true,
        "profile": {
            "profile_id": profile_id,
            "members": member_map
        }
    })
}

/// Create a successful guild reply.
pub fn guild(guild_id: &str, name: &str, members: &[Uuid]) -> Value {
    let members: Vec<Value> = members
        .iter()
        .map(|id| json!({ "uuid": id.simple().to_string(), "rank": "Member" }))
        .collect();

    json!({
        "success": true,
        "guild": {
            "_id": guild_id,
            "name": name,
            "members": members
        }
    })
}

/// Create an unsuccessful reply, e.g. for an invalid key.
pub fn unsuccessful(cause: &str) -> Value {
    json!({ "success": false, "cause": cause })
}

/// Create a successful reply without a record, under `field` (`player`, `profile` or `guild`).
pub fn empty(field: &str) -> Value {
    json!({ "success": true, field: null })
}
