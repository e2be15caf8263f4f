use mimir::server::{
    client::{GameApiClient, IdentityClient},
    config::CacheConfig,
    model::app::AppState,
    service::identity::IdentityService,
};

use super::*;

mod id_for {
    use super::*;

    /// Expect a name unknown to both tiers to be resolved remotely and persisted
    #[tokio::test]
    async fn resolves_remotely_and_persists() -> Result<(), TestError> {
        let id = Uuid::new_v4();
        let mut test = TestBuilder::new()
            .with_reply_tables()
            .with_identity_endpoint("Notch", id, 1)
            .build()
            .await?;
        let state = test.into_app_state();

        let first = IdentityService::new(&state).id_for("Notch").await;
        let second = IdentityService::new(&state).id_for("NOTCH").await;

        assert_eq!(first.ok(), Some(id));
        assert_eq!(second.ok(), Some(id));

        let rows = test.identity().find_identities(id).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].username, "Notch");
        test.assert_mocks();

        Ok(())
    }

    /// Expect a persisted mapping to be used without calling the identity service
    #[tokio::test]
    async fn uses_persisted_mapping() -> Result<(), TestError> {
        let id = Uuid::new_v4();
        let test = TestBuilder::new()
            .with_reply_tables()
            .with_identity(id, "Notch")
            .build()
            .await?;
        let state = test.into_app_state();

        let result = IdentityService::new(&state).id_for("notch").await;

        assert_eq!(result.ok(), Some(id));

        Ok(())
    }

    /// Expect a name the identity service does not know to be not found
    #[tokio::test]
    async fn unknown_name_is_not_found() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_reply_tables().build().await?;
        let no_content = test.identity().create_unknown_name_endpoint("Ghost", 204, 1);
        let not_found = test.identity().create_unknown_name_endpoint("Phantom", 404, 1);
        test.track(no_content);
        test.track(not_found);
        let state = test.into_app_state();

        for name in ["Ghost", "Phantom"] {
            let result = IdentityService::new(&state).id_for(name).await;

            assert!(result.is_err());
            assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
        }

        test.assert_mocks();

        Ok(())
    }

    /// Expect throttling by the identity service to be a transient failure
    #[tokio::test]
    async fn throttled_lookup_is_upstream_failure() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_reply_tables()
            .with_mock_endpoint(|server| {
                server
                    .mock("GET", "/users/profiles/minecraft/Notch")
                    .with_status(429)
                    .expect(1)
                    .create()
            })
            .build()
            .await?;
        let state = test.into_app_state();

        let result = IdentityService::new(&state).id_for("Notch").await;

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), ErrorKind::UpstreamUnavailable);
        test.assert_mocks();

        Ok(())
    }

    /// Expect an unreachable identity service to be a transient failure, not an unknown name
    #[tokio::test]
    async fn refused_connection_is_upstream_failure() -> Result<(), TestError> {
        let test = TestBuilder::new().with_reply_tables().build().await?;
        // Nothing listens on the discard port
        let identity_api = IdentityClient::new("http://127.0.0.1:9", TEST_USER_AGENT)
            .expect("Failed to build identity client");
        let game_api = GameApiClient::new(&test.url(), TEST_API_KEY, TEST_USER_AGENT)
            .expect("Failed to build game API client");
        let state = AppState::new(
            test.db.clone(),
            game_api,
            identity_api,
            CacheConfig::default(),
        );

        let result = IdentityService::new(&state).id_for("Notch").await;

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), ErrorKind::UpstreamUnavailable);

        Ok(())
    }

    /// Expect the lookup to succeed when the mapping cannot be persisted
    #[tokio::test]
    async fn tolerates_persistence_failure() -> Result<(), TestError> {
        let id = Uuid::new_v4();
        // No tables; every read and write against the database fails
        let test = TestBuilder::new()
            .with_identity_endpoint("Notch", id, 1)
            .build()
            .await?;
        let state = test.into_app_state();

        let result = IdentityService::new(&state).id_for("Notch").await;

        assert_eq!(result.ok(), Some(id));
        test.assert_mocks();

        Ok(())
    }
}

mod name_for {
    use super::*;

    /// Expect a stable ID with no mapping to be named from the player record
    #[tokio::test]
    async fn derives_name_from_player_record() -> Result<(), TestError> {
        let id = Uuid::new_v4();
        let mut test = TestBuilder::new()
            .with_reply_tables()
            .with_player_endpoint(id, factory::player(id, "Notch", &[]), 1)
            .build()
            .await?;
        let state = test.into_app_state();

        let result = IdentityService::new(&state).name_for(id).await;

        assert_eq!(result.ok().as_deref(), Some("Notch"));

        let rows = test.identity().find_identities(id).await?;
        assert_eq!(rows.len(), 1);
        assert!(test.game().find_player_reply(id).await?.is_some());
        test.assert_mocks();

        Ok(())
    }

    /// Expect a record without a display name to be not found
    #[tokio::test]
    async fn missing_record_is_not_found() -> Result<(), TestError> {
        let id = Uuid::new_v4();
        let test = TestBuilder::new()
            .with_reply_tables()
            .with_player_endpoint(id, factory::empty("player"), 1)
            .build()
            .await?;
        let state = test.into_app_state();

        let result = IdentityService::new(&state).name_for(id).await;

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);

        Ok(())
    }
}

mod invalidate_name_cache {
    use super::*;

    /// Expect the name to be re-derived from the newest mapping after invalidation
    #[tokio::test]
    async fn rederives_name_after_rename() -> Result<(), TestError> {
        let id = Uuid::new_v4();
        let mut test = TestBuilder::new()
            .with_reply_tables()
            .with_identity(id, "OldName")
            .build()
            .await?;
        let state = test.into_app_state();
        let identity_service = IdentityService::new(&state);

        assert_eq!(identity_service.name_for(id).await.ok().as_deref(), Some("OldName"));

        test.identity().insert_identity(id, "NewName").await?;

        // Still served from memory
        assert_eq!(identity_service.name_for(id).await.ok().as_deref(), Some("OldName"));

        identity_service.invalidate_name_cache(id);

        assert_eq!(identity_service.name_for(id).await.ok().as_deref(), Some("NewName"));

        Ok(())
    }

    /// Expect invalidating an unknown ID to be a no-op
    #[tokio::test]
    async fn unknown_id_is_noop() -> Result<(), TestError> {
        let test = TestBuilder::new().with_reply_tables().build().await?;
        let state = test.into_app_state();

        IdentityService::new(&state).invalidate_name_cache(Uuid::new_v4());

        Ok(())
    }
}

mod identify {
    use super::*;

    /// Expect the canonical capitalization regardless of the requested one
    #[tokio::test]
    async fn returns_canonical_name() -> Result<(), TestError> {
        let id = Uuid::new_v4();
        let mut test = TestBuilder::new().with_reply_tables().build().await?;
        let endpoint = test
            .identity()
            .create_identity_endpoint("notch", id, "Notch", 1);
        test.track(endpoint);
        let state = test.into_app_state();

        let result = IdentityService::new(&state).identify("notch").await;

        assert!(result.is_ok());
        let identity = result.unwrap();
        assert_eq!(identity.id, id);
        assert_eq!(identity.name, "Notch");
        test.assert_mocks();

        Ok(())
    }
}
