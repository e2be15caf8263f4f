//! Resolved player identities.

use uuid::Uuid;

/// A resolved name and stable ID pair.
///
/// The stable ID never changes for a player. The name may be renamed upstream, which is why
/// name lookups are cached separately and can be invalidated by ID.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerIdentity {
    /// Stable ID
    pub id: Uuid,
    /// Name with its registered capitalization
    pub name: String,
}

impl PlayerIdentity {
    /// Creates a new instance of [`PlayerIdentity`]
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
