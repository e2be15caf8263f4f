//! Identity service client.

use reqwest::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use crate::server::error::{
    config::ConfigError,
    upstream::{Upstream, UpstreamError},
};

use super::{build_http_client, status_error, transport_error};

/// Answer of the identity service for a known name.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct IdentityProfile {
    /// Stable ID; the service reports it undashed.
    pub id: Uuid,
    /// Name with the capitalization the player registered.
    pub name: String,
}

/// Client for the name to stable ID resolution service.
#[derive(Clone, Debug)]
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
}

impl IdentityClient {
    /// Builds a client for the identity service at `base_url`.
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            http: build_http_client("identity service", user_agent)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Looks up the stable ID currently registered to a name.
    ///
    /// The name must already have passed the username validity predicate, it is placed in
    /// the URL path as-is.
    ///
    /// # Returns
    /// - `Ok(Some(IdentityProfile))` - The name is registered
    /// - `Ok(None)` - The service answered 204, 404 or with an empty body
    /// - `Err(UpstreamError)` - Transport failure, throttling or an unexpected answer
    pub async fn lookup_id(&self, name: &str) -> Result<Option<IdentityProfile>, UpstreamError> {
        let service = Upstream::IdentityService;

        let response = self
            .http
            .get(format!("{}/users/profiles/minecraft/{}", self.base_url, name))
            .send()
            .await
            .map_err(|e| transport_error(service, e))?;

        let status = response.status();
        if let Some(err) = status_error(service, status) {
            return Err(err);
        }

        if status == StatusCode::NO_CONTENT || status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            return Err(UpstreamError::Status {
                service,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(service, e))?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|source| UpstreamError::InvalidPayload { service, source })
    }
}
