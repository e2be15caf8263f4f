//! Clients for the upstream services, the tier of last resort.
//!
//! Both clients are thin wrappers around a shared-configuration `reqwest::Client`. They map
//! transport failures and HTTP statuses to [`UpstreamError`] and never retry; retry policy
//! belongs to the caller.

pub mod game;
pub mod identity;

use std::time::Duration;

use reqwest::StatusCode;

pub use game::GameApiClient;
pub use identity::{IdentityClient, IdentityProfile};

use crate::server::error::{
    config::ConfigError,
    upstream::{Upstream, UpstreamError},
};

/// Deadline for a single HTTP request, connection setup included.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

fn build_http_client(
    service: &'static str,
    user_agent: &str,
) -> Result<reqwest::Client, ConfigError> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|source| ConfigError::HttpClient { service, source })
}

fn transport_error(service: Upstream, source: reqwest::Error) -> UpstreamError {
    if source.is_timeout() {
        UpstreamError::Timeout {
            service,
            after: REQUEST_TIMEOUT,
        }
    } else {
        UpstreamError::Transport { service, source }
    }
}

/// Maps statuses shared by both services; `None` means the caller should inspect the body.
fn status_error(service: Upstream, status: StatusCode) -> Option<UpstreamError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Some(UpstreamError::RateLimited { service });
    }

    if status.is_server_error() {
        return Some(UpstreamError::Status {
            service,
            status: status.as_u16(),
        });
    }

    None
}
