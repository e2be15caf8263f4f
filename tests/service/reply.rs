use mimir::server::{
    model::{
        payload::{PlayerReply, ProfileReply},
        reply::{CacheKey, Outcome},
    },
    service::reply::TieredReplyCache,
};

use super::*;

/// Expect each tier to be reported in order as the reply moves forward
#[tokio::test]
async fn reports_answering_tier() -> Result<(), TestError> {
    let id = Uuid::new_v4();
    let test = TestBuilder::new()
        .with_reply_tables()
        .with_player_endpoint(id, factory::player(id, "Notch", &[]), 1)
        .build()
        .await?;
    let state = test.into_app_state();
    let reply_cache = TieredReplyCache::new(&state);

    let fetched = reply_cache.get::<PlayerReply>(CacheKey::player(id)).await;
    let from_memory = reply_cache.get::<PlayerReply>(CacheKey::player(id)).await;

    assert!(matches!(fetched, Ok(Outcome::Fetched(_))));
    assert!(matches!(from_memory, Ok(Outcome::HitMemory(_))));

    // A new state shares the database but not the memory tier
    let fresh_state = test.into_app_state();
    let from_database = TieredReplyCache::new(&fresh_state)
        .get::<PlayerReply>(CacheKey::player(id))
        .await;

    assert!(matches!(from_database, Ok(Outcome::HitPersistent(_))));
    test.assert_mocks();

    Ok(())
}

/// Expect a mismatched key and reply type to be rejected before any tier
#[tokio::test]
async fn rejects_mismatched_kind() -> Result<(), TestError> {
    let test = TestBuilder::new().with_reply_tables().build().await?;
    let state = test.into_app_state();

    let result = TieredReplyCache::new(&state)
        .get::<ProfileReply>(CacheKey::player(Uuid::new_v4()))
        .await;

    assert!(result.is_err());
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Internal);

    Ok(())
}

/// Expect a failing persistent tier to fall through to the game API
#[tokio::test]
async fn survives_missing_tables() -> Result<(), TestError> {
    let id = Uuid::new_v4();
    let test = TestBuilder::new()
        .with_player_endpoint(id, factory::player(id, "Notch", &[]), 1)
        .build()
        .await?;
    let state = test.into_app_state();

    let result = TieredReplyCache::new(&state)
        .get::<PlayerReply>(CacheKey::player(id))
        .await;

    assert!(matches!(result, Ok(Outcome::Fetched(_))));
    test.assert_mocks();

    Ok(())
}

/// Expect a stale row to stay in place when the game API fails
#[tokio::test]
async fn upstream_failure_is_not_masked_by_stale_row() -> Result<(), TestError> {
    let id = Uuid::new_v4();
    let stale_at = Utc::now().naive_utc() - Duration::hours(2);
    let mut test = TestBuilder::new()
        .with_reply_tables()
        .with_mock_endpoint(move |server| {
            server
                .mock("GET", "/player")
                .match_query(mockito::Matcher::UrlEncoded(
                    "uuid".to_string(),
                    id.hyphenated().to_string(),
                ))
                .with_status(500)
                .expect(1)
                .create()
        })
        .build()
        .await?;
    test.game()
        .insert_player_reply(id, &factory::player(id, "Notch", &[]), stale_at)
        .await?;
    let state = test.into_app_state();

    let result = TieredReplyCache::new(&state)
        .get::<PlayerReply>(CacheKey::player(id))
        .await;

    assert!(result.is_err());
    assert_eq!(result.unwrap_err().kind(), ErrorKind::UpstreamUnavailable);

    let row = test.game().find_player_reply(id).await?;
    let row = row.expect("row should still exist");
    assert!(row.retrieved_at < Utc::now().naive_utc() - Duration::hours(1));
    test.assert_mocks();

    Ok(())
}
