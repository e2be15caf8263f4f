use mimir::server::controller::identity::{get_identity, invalidate_identity_name};

use super::*;

/// Expect 200 for a registered name
#[tokio::test]
async fn ok_for_registered_name() -> Result<(), TestError> {
    let id = Uuid::new_v4();
    let test = TestBuilder::new()
        .with_reply_tables()
        .with_identity(id, "Notch")
        .build()
        .await?;

    let result = get_identity(State(test.into_app_state()), Path("notch".to_string())).await;

    assert_eq!(respond(result).status(), StatusCode::OK);

    Ok(())
}

/// Expect 204 when invalidating a cached name
#[tokio::test]
async fn no_content_on_invalidate() -> Result<(), TestError> {
    let test = TestBuilder::new().with_reply_tables().build().await?;

    let result = invalidate_identity_name(
        State(test.into_app_state()),
        Path(Uuid::new_v4().to_string()),
    )
    .await;

    assert_eq!(respond(result).status(), StatusCode::NO_CONTENT);

    Ok(())
}

/// Expect 404 when the ID is not a UUID
#[tokio::test]
async fn not_found_for_malformed_id() -> Result<(), TestError> {
    let test = TestBuilder::new().with_reply_tables().build().await?;

    let result = invalidate_identity_name(
        State(test.into_app_state()),
        Path("not-a-uuid".to_string()),
    )
    .await;

    assert_eq!(respond(result).status(), StatusCode::NOT_FOUND);

    Ok(())
}
