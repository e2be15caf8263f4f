//! Test utilities for creating AppState pointed at the mock upstream server

use mimir::server::{
    client::{GameApiClient, IdentityClient},
    config::CacheConfig,
    model::app::AppState,
};
use mimir_test_utils::prelude::*;

/// Extension trait for TestContext to create AppState against its mock server
pub trait TestContextExt {
    /// Fresh state with an empty memory tier and default cache settings.
    fn into_app_state(&self) -> AppState;

    /// Fresh state with an empty memory tier and the given cache settings.
    fn into_app_state_with(&self, cache_config: CacheConfig) -> AppState;
}

impl TestContextExt for TestContext {
    fn into_app_state(&self) -> AppState {
        self.into_app_state_with(CacheConfig::default())
    }

    fn into_app_state_with(&self, cache_config: CacheConfig) -> AppState {
        let game_api = GameApiClient::new(&self.url(), TEST_API_KEY, TEST_USER_AGENT)
            .expect("Failed to build game API client");
        let identity_api = IdentityClient::new(&self.url(), TEST_USER_AGENT)
            .expect("Failed to build identity client");

        AppState::new(
            self.db.clone(),
            game_api,
            identity_api,
            cache_config,
        )
    }
}
