use mimir::server::service::guild::GuildService;

use super::*;

/// Expect lookups to normalize the name before reaching the game API
#[tokio::test]
async fn fetches_by_normalized_name() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_reply_tables()
        .with_guild_endpoint("mystic lords", factory::guild("g1", "Mystic Lords", &[]), 1)
        .build()
        .await?;
    let state = test.into_app_state();

    let first = GuildService::new(&state).resolve_guild(" Mystic Lords ").await;
    let second = GuildService::new(&state).resolve_guild("MYSTIC LORDS").await;

    assert!(first.is_ok());
    assert!(second.is_ok());
    assert!(test.game().find_guild_reply("mystic lords").await?.is_some());
    test.assert_mocks();

    Ok(())
}

/// Expect a persisted guild to be served however old it is
#[tokio::test]
async fn persisted_guild_never_goes_stale() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_reply_tables().build().await?;
    test.game()
        .insert_guild_reply(
            "mystic lords",
            &factory::guild("g1", "Mystic Lords", &[Uuid::new_v4()]),
            Utc::now().naive_utc() - Duration::days(365),
        )
        .await?;
    let state = test.into_app_state();

    let result = GuildService::new(&state).resolve_guild("Mystic Lords").await;

    assert!(result.is_ok());
    let guild = result.unwrap().guild.expect("record should be present");
    assert_eq!(guild.members.len(), 1);

    Ok(())
}

/// Expect a blank name to be not found without any calls
#[tokio::test]
async fn rejects_blank_name() -> Result<(), TestError> {
    let test = TestBuilder::new().with_reply_tables().build().await?;
    let state = test.into_app_state();

    let result = GuildService::new(&state).resolve_guild("   ").await;

    assert!(result.is_err());
    assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);

    Ok(())
}

/// Expect a missing guild to be not found
#[tokio::test]
async fn missing_guild_is_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_reply_tables()
        .with_guild_endpoint("nobody", factory::empty("guild"), 1)
        .build()
        .await?;
    let state = test.into_app_state();

    let result = GuildService::new(&state).resolve_guild("Nobody").await;

    assert!(result.is_err());
    assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
    test.assert_mocks();

    Ok(())
}

/// Expect a refresh to replace a persisted guild
#[tokio::test]
async fn refresh_replaces_persisted_guild() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_reply_tables()
        .with_guild_endpoint(
            "mystic lords",
            factory::guild("g1", "Mystic Lords", &[Uuid::new_v4(), Uuid::new_v4()]),
            1,
        )
        .build()
        .await?;
    test.game()
        .insert_guild_reply(
            "mystic lords",
            &factory::guild("g1", "Mystic Lords", &[]),
            Utc::now().naive_utc() - Duration::days(30),
        )
        .await?;
    let state = test.into_app_state();

    let result = GuildService::new(&state).refresh_guild("Mystic Lords").await;

    assert!(result.is_ok());

    let row = test.game().find_guild_reply("mystic lords").await?;
    let row = row.expect("row should still exist");
    let data: serde_json::Value = serde_json::from_str(&row.data)?;
    assert_eq!(data["guild"]["members"].as_array().map(Vec::len), Some(2));
    test.assert_mocks();

    Ok(())
}
