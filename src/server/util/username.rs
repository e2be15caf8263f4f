//! Player name validation.

/// Whether `name` can be a registered player name.
///
/// Names are 3 to 16 characters of ASCII letters, digits and underscores. Checked before any
/// cache tier so malformed names never reach the database or the network.
pub fn is_valid_username(name: &str) -> bool {
    let len = name.len();

    len > 2 && len < 17 && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
