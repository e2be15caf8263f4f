//! SeaORM entities for Mimir's persistent cache tier.

pub mod prelude;

pub mod guild_reply;
pub mod player_identity;
pub mod player_reply;
pub mod profile_reply;
