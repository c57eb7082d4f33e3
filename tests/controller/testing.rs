use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use rinkbook::{
    model::user::{TestLoginDto, UserDto},
    server::{controller::testing::testing_login, model::session::user::SessionUserId},
};

use super::*;

fn login_body(email: &str, is_coordinator: bool) -> Json<TestLoginDto> {
    Json(TestLoginDto {
        email: email.to_string(),
        is_administrator: false,
        is_coordinator,
    })
}

/// Expect the user to be created with the requested roles and logged in
#[tokio::test]
async fn creates_and_logs_in_user() -> Result<(), TestError> {
    let test = test_setup_with_rink_tables!()?;
    let state = test.into_app_state();

    let resp = testing_login(
        State(state),
        test.session.clone(),
        login_body("coord@example.com", true),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let user: UserDto = body_json(resp).await;
    assert!(user.is_coordinator);
    assert_eq!(
        SessionUserId::get(&test.session).await.unwrap(),
        Some(user.id)
    );

    Ok(())
}

/// Expect an existing user to be logged in rather than duplicated
#[tokio::test]
async fn reuses_existing_user() -> Result<(), TestError> {
    let mut test = test_setup_with_rink_tables!()?;
    let existing = test.user().insert_user("skater@example.com").await?;
    let state = test.into_app_state();

    let resp = testing_login(
        State(state),
        test.session.clone(),
        login_body("skater@example.com", false),
    )
    .await
    .into_response();

    let user: UserDto = body_json(resp).await;
    assert_eq!(user.id, existing.id);

    Ok(())
}

/// Expect 400 when testing mode is off
#[tokio::test]
async fn disabled_outside_testing() -> Result<(), TestError> {
    let test = test_setup_with_rink_tables!()?;
    let state = test.into_app_state_with_testing(false);

    let resp = testing_login(
        State(state),
        test.session.clone(),
        login_body("skater@example.com", false),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(SessionUserId::get(&test.session).await.unwrap().is_none());

    Ok(())
}
