use mimir::server::controller::player::get_player;

use super::*;

/// Expect 200 for a known player
#[tokio::test]
async fn ok_for_known_player() -> Result<(), TestError> {
    let id = Uuid::new_v4();
    let test = TestBuilder::new()
        .with_reply_tables()
        .with_identity_endpoint("Notch", id, 1)
        .with_player_endpoint(id, factory::player(id, "Notch", &[("p1", "Apple")]), 1)
        .build()
        .await?;

    let result = get_player(State(test.into_app_state()), Path("Notch".to_string())).await;

    assert_eq!(respond(result).status(), StatusCode::OK);
    test.assert_mocks();

    Ok(())
}

/// Expect 404 for a malformed name
#[tokio::test]
async fn not_found_for_invalid_name() -> Result<(), TestError> {
    let test = TestBuilder::new().with_reply_tables().build().await?;

    let result = get_player(State(test.into_app_state()), Path("no".to_string())).await;

    assert_eq!(respond(result).status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect 503 when the identity service is down
#[tokio::test]
async fn service_unavailable_when_upstream_fails() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_reply_tables()
        .with_mock_endpoint(|server| {
            server
                .mock("GET", "/users/profiles/minecraft/Notch")
                .with_status(503)
                .expect(1)
                .create()
        })
        .build()
        .await?;

    let result = get_player(State(test.into_app_state()), Path("Notch".to_string())).await;

    assert_eq!(respond(result).status(), StatusCode::SERVICE_UNAVAILABLE);
    test.assert_mocks();

    Ok(())
}
