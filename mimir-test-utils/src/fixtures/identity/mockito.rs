//! Identity service mock endpoint creation utilities.

use mockito::Mock;
use serde_json::json;
use uuid::Uuid;

use crate::fixtures::identity::IdentityFixtures;

impl<'a> IdentityFixtures<'a> {
    /// Create a mock HTTP endpoint resolving a name to a stable ID.
    ///
    /// Sets up a mock GET endpoint at `/users/profiles/minecraft/{name}` that answers with
    /// `{"id": <undashed id>, "name": <canonical_name>}`.
    ///
    /// # Arguments
    /// - `name` - Name exactly as the client will request it
    /// - `id` - Stable ID to answer with
    /// - `canonical_name` - Name capitalization to answer with
    /// - `expected_requests` - Number of times this endpoint should be called
    pub fn create_identity_endpoint(
        &mut self,
        name: &str,
        id: Uuid,
        canonical_name: &str,
        expected_requests: usize,
    ) -> Mock {
        let body = json!({ "id": id.simple().to_string(), "name": canonical_name });

        self.setup
            .server
            .mock("GET", format!("/users/profiles/minecraft/{}", name).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock HTTP endpoint for an unknown name, answering with `status` and no body.
    ///
    /// The identity service has answered unknown names with both 204 and 404.
    pub fn create_unknown_name_endpoint(
        &mut self,
        name: &str,
        status: usize,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock("GET", format!("/users/profiles/minecraft/{}", name).as_str())
            .with_status(status)
            .expect(expected_requests)
            .create()
    }
}
