//! Game API client.

use serde::Deserialize;

use crate::server::{
    error::{config::ConfigError, upstream::{Upstream, UpstreamError}},
    model::reply::{CacheKey, Reply, ReplyKind},
};

use super::{build_http_client, status_error, transport_error};

const API_KEY_HEADER: &str = "API-Key";

/// Client for the remote game-data API.
#[derive(Clone, Debug)]
pub struct GameApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Body of a rejected request, e.g. `{"success": false, "cause": "Invalid API key"}`.
#[derive(Deserialize)]
struct Rejection {
    #[serde(default)]
    cause: Option<String>,
}

impl GameApiClient {
    /// Creates a new game API client.
    ///
    /// # Arguments
    /// - `base_url` - API root without a trailing slash, e.g. `https://api.hypixel.net`
    /// - `api_key` - Key sent in the `API-Key` header of every request
    /// - `user_agent` - User agent identifying this deployment
    pub fn new(base_url: &str, api_key: &str, user_agent: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            http: build_http_client("game API", user_agent)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Fetches the reply addressed by a cache key.
    ///
    /// The reply is returned as decoded, usable or not; deciding what an unsuccessful or
    /// empty reply means is left to the caller.
    ///
    /// # Returns
    /// - `Ok(T)` - The game API answered with a decodable body
    /// - `Err(UpstreamError::RateLimited)` - HTTP 429
    /// - `Err(UpstreamError::Rejected)` - A 4xx status with a `cause` in the body
    /// - `Err(UpstreamError::Status)` - Any other non-success status
    /// - `Err(UpstreamError::Transport | Timeout)` - No response was received
    /// - `Err(UpstreamError::InvalidPayload)` - The body did not decode into `T`
    pub async fn fetch<T: Reply>(&self, key: &CacheKey) -> Result<T, UpstreamError> {
        let service = Upstream::GameApi;
        let (path, param) = match key.kind() {
            ReplyKind::Player => ("/player", "uuid"),
            ReplyKind::Profile => ("/skyblock/profile", "profile"),
            ReplyKind::Guild => ("/guild", "name"),
        };

        tracing::debug!("Requesting {} from the game API", key);

        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(&[(param, key.id())])
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| transport_error(service, e))?;

        let status = response.status();
        if let Some(err) = status_error(service, status) {
            return Err(err);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(service, e))?;

        if !status.is_success() {
            return Err(match serde_json::from_slice::<Rejection>(&body) {
                Ok(Rejection { cause: Some(cause) }) => UpstreamError::Rejected { service, cause },
                _ => UpstreamError::Status {
                    service,
                    status: status.as_u16(),
                },
            });
        }

        serde_json::from_slice(&body)
            .map_err(|source| UpstreamError::InvalidPayload { service, source })
    }
}
