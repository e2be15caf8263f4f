use mimir::server::controller::guild::get_guild;

use super::*;

/// Expect 200 for a known guild
#[tokio::test]
async fn ok_for_known_guild() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_reply_tables()
        .with_guild_endpoint("mystic lords", factory::guild("g1", "Mystic Lords", &[]), 1)
        .build()
        .await?;

    let result = get_guild(
        State(test.into_app_state()),
        Path("Mystic Lords".to_string()),
    )
    .await;

    assert_eq!(respond(result).status(), StatusCode::OK);
    test.assert_mocks();

    Ok(())
}

/// Expect 404 for an unknown guild
#[tokio::test]
async fn not_found_for_unknown_guild() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_reply_tables()
        .with_guild_endpoint("nobody", factory::empty("guild"), 1)
        .build()
        .await?;

    let result = get_guild(State(test.into_app_state()), Path("nobody".to_string())).await;

    assert_eq!(respond(result).status(), StatusCode::NOT_FOUND);
    test.assert_mocks();

    Ok(())
}
