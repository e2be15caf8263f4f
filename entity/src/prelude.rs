pub use super::guild_reply::Entity as GuildReply;
pub use super::player_identity::Entity as PlayerIdentity;
pub use super::player_reply::Entity as PlayerReply;
pub use super::profile_reply::Entity as ProfileReply;
