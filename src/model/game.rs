use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct IdentityDto {
    /// Stable player identifier (hyphenated UUID)
    pub id: String,
    /// Current display name
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ProfileRefDto {
    pub profile_id: String,
    pub label: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PlayerDto {
    pub id: String,
    pub name: Option<String>,
    pub profiles: Vec<ProfileRefDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ProfileDto {
    pub profile_id: String,
    pub label: Option<String>,
    /// Last save timestamp of the requested player within this profile
    pub last_save: Option<i64>,
    pub member_count: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct GuildDto {
    pub id: String,
    pub name: String,
    pub member_count: usize,
}
