//! Process configuration.
//!
//! Connection settings come from the environment (optionally seeded from a `.env` file by
//! `dotenvy` in `main`). Cache tunables live in [`CacheConfig`] and default to the values
//! the engine was designed around.

use std::{net::SocketAddr, time::Duration};

use crate::server::error::config::ConfigError;

const DEFAULT_GAME_API_URL: &str = "https://api.hypixel.net";
const DEFAULT_IDENTITY_API_URL: &str = "https://api.mojang.com";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Environment-derived settings for the server process.
#[derive(Debug, Clone)]
pub struct Config {
    /// `DATABASE_URL`
    pub database_url: String,
    /// `GAME_API_KEY`, sent with every game API request
    pub game_api_key: String,
    /// `GAME_API_URL`
    pub game_api_url: String,
    /// `IDENTITY_API_URL`
    pub identity_api_url: String,
    /// `USER_AGENT` for both upstream clients
    pub user_agent: String,
    /// `BIND_ADDRESS` of the HTTP listener
    pub bind_address: SocketAddr,
    /// Cache tunables
    pub cache: CacheConfig,
}

impl Config {
    /// Reads configuration from process environment variables.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables are present and valid
    /// - `Err(ConfigError::MissingEnvVar)` - `DATABASE_URL`, `GAME_API_KEY` or `USER_AGENT` is unset
    /// - `Err(ConfigError::InvalidEnvValue)` - A variable is set but blank or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary lookup function.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value for a variable name, or `None` when it is unset
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String, ConfigError> {
            let value = lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))?;

            if value.trim().is_empty() {
                return Err(ConfigError::InvalidEnvValue {
                    var: key.to_string(),
                    reason: "value is blank".to_string(),
                });
            }

            Ok(value)
        };

        let database_url = required("DATABASE_URL")?;
        let game_api_key = required("GAME_API_KEY")?;
        let user_agent = required("USER_AGENT")?;

        let game_api_url = base_url(&lookup, "GAME_API_URL", DEFAULT_GAME_API_URL)?;
        let identity_api_url = base_url(&lookup, "IDENTITY_API_URL", DEFAULT_IDENTITY_API_URL)?;

        let bind_address = lookup("BIND_ADDRESS")
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvValue {
                var: "BIND_ADDRESS".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            database_url,
            game_api_key,
            game_api_url,
            identity_api_url,
            user_agent,
            bind_address,
            cache: CacheConfig::default(),
        })
    }
}

/// Optional base URL with a default; trailing slashes are stripped so paths can be appended.
fn base_url<F>(lookup: &F, key: &str, default: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let url = lookup(key).unwrap_or_else(|| default.to_string());

    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvValue {
            var: key.to_string(),
            reason: format!("{url:?} is not an http(s) URL"),
        });
    }

    Ok(url.trim_end_matches('/').to_string())
}

/// Tunables for the memory tier, the freshness window and per-call deadlines.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Idle expiry for memory-tier replies (seconds).
    pub reply_idle_seconds: u64,

    /// Idle expiry for the name -> ID and ID -> name maps (seconds).
    pub identity_idle_seconds: u64,

    /// Age after which a persistent row no longer counts as a hit (seconds).
    ///
    /// Also caps how long a reply can live in the memory tier regardless of access.
    pub freshness_seconds: u64,

    /// Deadline for a single profile fetch during fan-out (seconds).
    pub profile_fetch_timeout_seconds: u64,

    /// Deadline for the player-record fallback in a name lookup (seconds).
    pub name_lookup_timeout_seconds: u64,

    /// Maximum replies held in the memory tier.
    pub reply_capacity: u64,

    /// Maximum entries in each identity map.
    pub identity_capacity: u64,
}

impl CacheConfig {
    /// Get reply idle expiry as Duration
    pub fn reply_idle(&self) -> Duration {
        Duration::from_secs(self.reply_idle_seconds)
    }

    /// Get identity idle expiry as Duration
    pub fn identity_idle(&self) -> Duration {
        Duration::from_secs(self.identity_idle_seconds)
    }

    /// Get freshness window as Duration
    pub fn freshness(&self) -> Duration {
        Duration::from_secs(self.freshness_seconds)
    }

    /// Get profile fetch timeout as Duration
    pub fn profile_fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.profile_fetch_timeout_seconds)
    }

    /// Get name lookup timeout as Duration
    pub fn name_lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.name_lookup_timeout_seconds)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            reply_idle_seconds: 90,
            identity_idle_seconds: 30 * 60,         // 30 minutes
            freshness_seconds: 30 * 60,             // 30 minutes
            profile_fetch_timeout_seconds: 5,
            name_lookup_timeout_seconds: 10,
            reply_capacity: 10_000,
            identity_capacity: 50_000,
        }
    }
}
