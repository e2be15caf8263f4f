//! Game API mock endpoint creation utilities.
//!
//! Every endpoint only matches requests that carry the test API key and the expected query
//! parameter, and verifies it was called exactly `expected_requests` times.

use mockito::{Matcher, Mock};
use serde_json::Value;
use uuid::Uuid;

use crate::{constant::TEST_API_KEY, fixtures::game::GameFixtures};

impl<'a> GameFixtures<'a> {
    /// Create a mock HTTP endpoint for a player reply.
    ///
    /// Sets up a mock GET endpoint at `/player?uuid={id}` with the hyphenated ID.
    ///
    /// # Arguments
    /// - `id` - Stable ID of the player
    /// - `body` - Reply body, see [`factory::player`](crate::fixtures::game::factory::player)
    /// - `expected_requests` - Number of times this endpoint should be called
    ///
    /// # Returns
    /// - `Mock` - The created mock endpoint
    pub fn create_player_endpoint(&mut self, id: Uuid, body: &Value, expected_requests: usize) -> Mock {
        self.create_endpoint(
            "/player",
            "uuid",
            &id.hyphenated().to_string(),
            200,
            body,
            expected_requests,
        )
    }

    /// Create a mock HTTP endpoint for a profile reply at `/skyblock/profile?profile={id}`.
    pub fn create_profile_endpoint(
        &mut self,
        profile_id: &str,
        body: &Value,
        expected_requests: usize,
    ) -> Mock {
        self.create_endpoint(
            "/skyblock/profile",
            "profile",
            profile_id,
            200,
            body,
            expected_requests,
        )
    }

    /// Create a mock HTTP endpoint for a profile that fails with the given status.
    pub fn create_profile_error_endpoint(
        &mut self,
        profile_id: &str,
        status: usize,
        expected_requests: usize,
    ) -> Mock {
        self.create_endpoint(
            "/skyblock/profile",
            "profile",
            profile_id,
            status,
            &Value::Null,
            expected_requests,
        )
    }

    /// Create a mock HTTP endpoint for a guild reply at `/guild?name={name_key}`.
    ///
    /// # Arguments
    /// - `name_key` - Trimmed, lower-cased guild name as sent by the client
    pub fn create_guild_endpoint(
        &mut self,
        name_key: &str,
        body: &Value,
        expected_requests: usize,
    ) -> Mock {
        self.create_endpoint("/guild", "name", name_key, 200, body, expected_requests)
    }

    /// Create a mock endpoint with an arbitrary status and body.
    ///
    /// A `Value::Null` body is served as an empty body.
    pub fn create_endpoint(
        &mut self,
        path: &str,
        param: &str,
        value: &str,
        status: usize,
        body: &Value,
        expected_requests: usize,
    ) -> Mock {
        let body = if body.is_null() {
            String::new()
        } else {
            body.to_string()
        };

        self.setup
            .server
            .mock("GET", path)
            .match_query(Matcher::UrlEncoded(param.to_string(), value.to_string()))
            .match_header("API-Key", TEST_API_KEY)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(expected_requests)
            .create()
    }
}
