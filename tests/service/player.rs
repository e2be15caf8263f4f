use mimir::server::service::player::PlayerService;

use super::*;

/// Expect a malformed name to fail before any tier or upstream is consulted
#[tokio::test]
async fn rejects_invalid_name_without_calls() -> Result<(), TestError> {
    let test = TestBuilder::new().with_reply_tables().build().await?;
    let state = test.into_app_state();

    for name in ["ab", "name with spaces", "seventeen_chars__", ""] {
        let result = PlayerService::new(&state).resolve_player(name).await;

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
    }

    // No mocks registered; any request would have failed the lookup differently
    test.assert_mocks();

    Ok(())
}

/// Expect repeated lookups to hit the upstream services once
#[tokio::test]
async fn caches_player_after_first_lookup() -> Result<(), TestError> {
    let id = Uuid::new_v4();
    let test = TestBuilder::new()
        .with_reply_tables()
        .with_identity_endpoint("Notch", id, 1)
        .with_player_endpoint(id, factory::player(id, "Notch", &[]), 1)
        .build()
        .await?;
    let state = test.into_app_state();

    let first = PlayerService::new(&state).resolve_player("Notch").await;
    let second = PlayerService::new(&state).resolve_player("notch").await;

    assert!(first.is_ok());
    assert!(second.is_ok());

    let player = second.unwrap().player.expect("record should be present");
    assert_eq!(player.displayname.as_deref(), Some("Notch"));

    test.assert_mocks();

    Ok(())
}

/// Expect a fresh persisted reply to be served without calling the game API
#[tokio::test]
async fn serves_fresh_persisted_reply() -> Result<(), TestError> {
    let id = Uuid::new_v4();
    let mut test = TestBuilder::new()
        .with_reply_tables()
        .with_identity(id, "Notch")
        .build()
        .await?;
    test.game()
        .insert_player_reply(
            id,
            &factory::player(id, "Notch", &[]),
            Utc::now().naive_utc() - Duration::minutes(5),
        )
        .await?;
    let state = test.into_app_state();

    let result = PlayerService::new(&state).resolve_player("Notch").await;

    assert!(result.is_ok());

    Ok(())
}

/// Expect a stale persisted reply to be refetched and overwritten
#[tokio::test]
async fn refetches_stale_persisted_reply() -> Result<(), TestError> {
    let id = Uuid::new_v4();
    let stale_at = Utc::now().naive_utc() - Duration::minutes(45);
    let mut test = TestBuilder::new()
        .with_reply_tables()
        .with_identity(id, "Notch")
        .with_player_endpoint(id, factory::player(id, "Notch", &[]), 1)
        .build()
        .await?;
    test.game()
        .insert_player_reply(id, &factory::player(id, "OldName", &[]), stale_at)
        .await?;
    let state = test.into_app_state();

    let result = PlayerService::new(&state).resolve_player("Notch").await;

    assert!(result.is_ok());
    let player = result.unwrap().player.expect("record should be present");
    assert_eq!(player.displayname.as_deref(), Some("Notch"));

    let row = test.game().find_player_reply(id).await?;
    let row = row.expect("row should still exist");
    assert!(row.retrieved_at > stale_at);

    test.assert_mocks();

    Ok(())
}

/// Expect an undecodable persisted reply to be treated as a miss and replaced
#[tokio::test]
async fn replaces_corrupted_persisted_reply() -> Result<(), TestError> {
    let id = Uuid::new_v4();
    let mut test = TestBuilder::new()
        .with_reply_tables()
        .with_identity(id, "Notch")
        .with_player_endpoint(id, factory::player(id, "Notch", &[]), 1)
        .build()
        .await?;
    test.game()
        .insert_player_reply_raw(id, "{not json".to_string(), Utc::now().naive_utc())
        .await?;
    let state = test.into_app_state();

    let result = PlayerService::new(&state).resolve_player("Notch").await;

    assert!(result.is_ok());

    let row = test.game().find_player_reply(id).await?;
    let row = row.expect("row should still exist");
    let data: serde_json::Value = serde_json::from_str(&row.data)?;
    assert_eq!(data["player"]["displayname"], "Notch");

    test.assert_mocks();

    Ok(())
}

/// Expect a reply without a player record to be not found and left uncached
#[tokio::test]
async fn missing_record_is_not_found() -> Result<(), TestError> {
    let id = Uuid::new_v4();
    let mut test = TestBuilder::new()
        .with_reply_tables()
        .with_identity(id, "Notch")
        .with_player_endpoint(id, factory::empty("player"), 2)
        .build()
        .await?;
    let state = test.into_app_state();

    for _ in 0..2 {
        let result = PlayerService::new(&state).resolve_player("Notch").await;

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
    }

    assert!(test.game().find_player_reply(id).await?.is_none());
    test.assert_mocks();

    Ok(())
}

/// Expect an unsuccessful reply to surface as an upstream failure
#[tokio::test]
async fn unsuccessful_reply_is_upstream_failure() -> Result<(), TestError> {
    let id = Uuid::new_v4();
    let test = TestBuilder::new()
        .with_reply_tables()
        .with_identity(id, "Notch")
        .with_player_endpoint(id, factory::unsuccessful("Invalid API key"), 1)
        .build()
        .await?;
    let state = test.into_app_state();

    let result = PlayerService::new(&state).resolve_player("Notch").await;

    assert!(result.is_err());
    assert_eq!(result.unwrap_err().kind(), ErrorKind::UpstreamUnavailable);
    test.assert_mocks();

    Ok(())
}

/// Expect a refresh to call the game API even when both tiers hold the player
#[tokio::test]
async fn refresh_bypasses_tiers() -> Result<(), TestError> {
    let id = Uuid::new_v4();
    let test = TestBuilder::new()
        .with_reply_tables()
        .with_identity(id, "Notch")
        .with_player_endpoint(id, factory::player(id, "Notch", &[]), 2)
        .build()
        .await?;
    let state = test.into_app_state();

    let resolved = PlayerService::new(&state).resolve_player("Notch").await;
    let refreshed = PlayerService::new(&state).refresh_player("Notch").await;

    assert!(resolved.is_ok());
    assert!(refreshed.is_ok());
    test.assert_mocks();

    Ok(())
}
