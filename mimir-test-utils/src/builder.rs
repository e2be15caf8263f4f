//! Declarative test builder.
//!
//! This module provides the `TestBuilder` API for configuring test environments before execution.
//! Methods can be chained together, with all operations queued and executed during the final
//! `build()` call.

use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};
use serde_json::Value;
use uuid::Uuid;

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
///
/// Provides an interface for setting up test environments with database tables, identity
/// rows and mock upstream endpoints. Finalize with `build()`.
pub struct TestBuilder {
    // Tables to create
    tables: Vec<TableCreateStatement>,
    include_reply_tables: bool,

    // Database fixtures to insert
    identities: Vec<(Uuid, String)>,

    // Mock endpoints to create
    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,

    // Pre-configured endpoint shortcuts
    identity_endpoints: Vec<(String, Uuid, String, usize)>, // (requested name, id, canonical name, expected)
    player_endpoints: Vec<(Uuid, Value, usize)>,
    profile_endpoints: Vec<(String, Value, usize)>,
    guild_endpoints: Vec<(String, Value, usize)>,
}

impl TestBuilder {
    /// Create a new TestBuilder.
    ///
    /// # Returns
    /// - `TestBuilder` - A new builder instance ready for configuration
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_reply_tables: false,
            identities: Vec::new(),
            mock_builders: Vec::new(),
            identity_endpoints: Vec::new(),
            player_endpoints: Vec::new(),
            profile_endpoints: Vec::new(),
            guild_endpoints: Vec::new(),
        }
    }

    /// Add every table the engine reads and writes.
    ///
    /// Creates PlayerIdentity, PlayerReply, ProfileReply and GuildReply.
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_reply_tables(mut self) -> Self {
        self.include_reply_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// # Arguments
    /// - `entity` - Entity type implementing `EntityTrait`
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mimir_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), mimir_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(PlayerIdentity)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a name to stable ID mapping into the database.
    ///
    /// Requires the PlayerIdentity table, see [`Self::with_reply_tables`].
    pub fn with_identity(mut self, id: Uuid, name: impl Into<String>) -> Self {
        self.identities.push((id, name.into()));
        self
    }

    /// Add a mock identity service endpoint resolving `name`.
    ///
    /// # Arguments
    /// - `name` - Name exactly as the client will request it
    /// - `id` - Stable ID to answer with
    /// - `expected_requests` - Number of times this endpoint should be called
    pub fn with_identity_endpoint(
        mut self,
        name: impl Into<String>,
        id: Uuid,
        expected_requests: usize,
    ) -> Self {
        let name = name.into();
        self.identity_endpoints
            .push((name.clone(), id, name, expected_requests));
        self
    }

    /// Add a mock player endpoint.
    ///
    /// # Arguments
    /// - `id` - Stable ID of the player
    /// - `body` - Reply body, usually from [`factory::player`](crate::fixtures::game::factory::player)
    /// - `expected_requests` - Number of times this endpoint should be called
    pub fn with_player_endpoint(mut self, id: Uuid, body: Value, expected_requests: usize) -> Self {
        self.player_endpoints.push((id, body, expected_requests));
        self
    }

    /// Add a mock profile endpoint.
    pub fn with_profile_endpoint(
        mut self,
        profile_id: impl Into<String>,
        body: Value,
        expected_requests: usize,
    ) -> Self {
        self.profile_endpoints
            .push((profile_id.into(), body, expected_requests));
        self
    }

    /// Add a mock guild endpoint keyed by the trimmed, lower-cased name.
    pub fn with_guild_endpoint(
        mut self,
        name_key: impl Into<String>,
        body: Value,
        expected_requests: usize,
    ) -> Self {
        self.guild_endpoints
            .push((name_key.into(), body, expected_requests));
        self
    }

    /// Add a custom mock endpoint with full control.
    ///
    /// # Arguments
    /// - `setup` - Closure that receives the mock server and returns a configured Mock
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Build the test setup by creating all configured tables, fixtures, and mock endpoints.
    ///
    /// Executes all queued operations in the following order:
    /// 1. Creates database tables (reply tables if specified, then custom tables)
    /// 2. Inserts identity rows
    /// 3. Creates mock HTTP endpoints (custom endpoints first, then shortcuts)
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError::DbErr)` - Database table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        // 1. Create tables
        let mut all_tables = Vec::new();

        if self.include_reply_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::PlayerIdentity),
                schema.create_table_from_entity(entity::prelude::PlayerReply),
                schema.create_table_from_entity(entity::prelude::ProfileReply),
                schema.create_table_from_entity(entity::prelude::GuildReply),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        // 2. Insert fixtures
        for (id, name) in self.identities {
            setup.identity().insert_identity(id, &name).await?;
        }

        // 3. Create mock endpoints
        // Custom endpoints are created first so tests can register an error response ahead
        // of a shortcut endpoint for the same path
        let mut mocks = Vec::new();

        for builder in self.mock_builders {
            mocks.push(builder(&mut setup.server));
        }

        for (name, id, canonical_name, expected) in self.identity_endpoints {
            mocks.push(
                setup
                    .identity()
                    .create_identity_endpoint(&name, id, &canonical_name, expected),
            );
        }

        for (id, body, expected) in self.player_endpoints {
            mocks.push(setup.game().create_player_endpoint(id, &body, expected));
        }

        for (profile_id, body, expected) in self.profile_endpoints {
            mocks.push(
                setup
                    .game()
                    .create_profile_endpoint(&profile_id, &body, expected),
            );
        }

        for (name_key, body, expected) in self.guild_endpoints {
            mocks.push(setup.game().create_guild_endpoint(&name_key, &body, expected));
        }

        // Store mocks in setup so they live as long as the test
        setup.mocks = mocks;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
