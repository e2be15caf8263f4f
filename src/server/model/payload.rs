//! Upstream game API reply shapes.
//!
//! Each reply is decoded into a thin typed envelope around the fields the engine reads.
//! Everything else is kept in a flattened `extra` map so a reply written to the persistent
//! tier round-trips without losing fields callers may depend on.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reply from `GET /player?uuid=`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerReply {
    /// `false` when the game API refused the request
    pub success: bool,
    /// Reason given with an unsuccessful reply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    /// `null` when the game API has no record for the player
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<PlayerRecord>,
    /// Fields the engine does not read
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Player record as held by the game API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Undashed stable ID as reported by the game API.
    pub uuid: String,
    /// Current name with its registered capitalization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displayname: Option<String>,
    /// Per-game statistics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<PlayerStats>,
    /// Fields the engine does not read
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-game statistics of a player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// SkyBlock statistics, which list the player's profiles
    #[serde(rename = "SkyBlock", default, skip_serializing_if = "Option::is_none")]
    pub skyblock: Option<SkyBlockStats>,
    /// Fields the engine does not read
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// SkyBlock section of a player record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkyBlockStats {
    /// Profile references keyed by profile ID, in upstream document order.
    #[serde(default)]
    pub profiles: Map<String, Value>,
    /// Fields the engine does not read
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A profile reference listed on a player record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileRef {
    /// Profile ID to fetch
    pub profile_id: String,
    /// Human-readable profile label, e.g. "Banana".
    pub cute_name: Option<String>,
}

impl PlayerRecord {
    /// Profile references in the order the game API listed them.
    ///
    /// The map key is the profile ID; the nested `profile_id` field is preferred when present.
    pub fn profile_refs(&self) -> Vec<ProfileRef> {
        let Some(profiles) = self
            .stats
            .as_ref()
            .and_then(|stats| stats.skyblock.as_ref())
            .map(|skyblock| &skyblock.profiles)
        else {
            return Vec::new();
        };

        profiles
            .iter()
            .map(|(key, value)| ProfileRef {
                profile_id: value
                    .get("profile_id")
                    .and_then(Value::as_str)
                    .unwrap_or(key)
                    .to_string(),
                cute_name: value
                    .get("cute_name")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            })
            .collect()
    }
}

/// Reply from `GET /skyblock/profile?profile=`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileReply {
    /// `false` when the game API refused the request
    pub success: bool,
    /// Reason given with an unsuccessful reply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    /// `null` when the game API has no such profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileRecord>,
    /// Fields the engine does not read
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Profile record as held by the game API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Profile ID
    pub profile_id: String,
    /// Per-member views keyed by undashed stable ID.
    #[serde(default)]
    pub members: Map<String, Value>,
    /// Label copied from the player's profile reference once selected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cute_name: Option<String>,
    /// Fields the engine does not read
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProfileRecord {
    /// Last save timestamp of one member, `i64::MIN` when the member or the field is missing.
    ///
    /// # Arguments
    /// - `member_key` - Undashed stable ID of the member
    pub fn last_save_of(&self, member_key: &str) -> i64 {
        self.members
            .get(member_key)
            .and_then(|member| member.get("last_save"))
            .and_then(Value::as_i64)
            .unwrap_or(i64::MIN)
    }
}

/// Reply from `GET /guild?name=`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuildReply {
    /// `false` when the game API refused the request
    pub success: bool,
    /// Reason given with an unsuccessful reply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    /// `null` when no guild has the name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild: Option<GuildRecord>,
    /// Fields the engine does not read
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Guild record as held by the game API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuildRecord {
    /// Guild ID
    #[serde(rename = "_id")]
    pub id: String,
    /// Guild name
    pub name: String,
    /// Member entries as listed by the game API
    #[serde(default)]
    pub members: Vec<Value>,
    /// Fields the engine does not read
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
