use axum::{
    extract::{Path, Query, State},
    http::{header::LOCATION, StatusCode},
    response::IntoResponse,
};
use rinkbook::{
    model::{
        auth::{ProviderKind, ProvidersDto},
        user::UserDto,
    },
    server::{
        controller::auth::{callback, get_user, login, logout, providers, CallbackParams},
        model::session::{auth::SessionAuthCsrf, user::SessionUserId},
    },
};
use serde_json::json;

use super::*;

fn callback_params(state: &str) -> Query<CallbackParams> {
    Query(CallbackParams {
        state: state.to_string(),
        code: "authorization_code".to_string(),
    })
}

#[tokio::test]
async fn lists_enabled_providers() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    let state = test.into_app_state();

    let resp = providers(State(state)).await.into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let providers: ProvidersDto = body_json(resp).await;
    assert_eq!(
        providers.providers,
        vec![ProviderKind::Google, ProviderKind::Github, ProviderKind::Facebook]
    );

    Ok(())
}

/// Expect a redirect to the provider's authorization URL with the CSRF state stored
#[tokio::test]
async fn login_redirects_to_provider() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    let state = test.into_app_state();

    let resp = login(
        State(state),
        test.session.clone(),
        Path("google".to_string()),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    let location = resp.headers().get(LOCATION).unwrap().to_str().unwrap();
    assert!(location.starts_with(&test.provider_url("google", "authorize")));
    let csrf = SessionAuthCsrf::get(&test.session).await.unwrap();
    assert!(location.contains(&format!("state={}", csrf)));

    Ok(())
}

/// Expect 404 for a provider Rinkbook doesn't support
#[tokio::test]
async fn login_unknown_provider_is_not_found() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    let state = test.into_app_state();

    let resp = login(
        State(state),
        test.session.clone(),
        Path("myspace".to_string()),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect a new user to be created and logged in by the callback
#[tokio::test]
async fn callback_logs_in_new_user() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_rink_tables()
        .with_token_endpoint("github", "access_token", 1)
        .with_userinfo_endpoint(
            "github",
            json!({"id": 4242, "email": "Skater@Example.com"}),
            1,
        )
        .build()
        .await?;
    let state = test.into_app_state();
    SessionAuthCsrf::insert(&test.session, "csrf_state")
        .await
        .unwrap();

    let resp = callback(
        State(state.clone()),
        test.session.clone(),
        Path("github".to_string()),
        callback_params("csrf_state"),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    test.assert_mocks();

    let resp = get_user(State(state), test.session.clone())
        .await
        .into_response();
    let user: UserDto = body_json(resp).await;
    assert_eq!(user.email, "skater@example.com");

    Ok(())
}

/// Expect 400 and no provider requests for a mismatched CSRF state
#[tokio::test]
async fn callback_rejects_csrf_mismatch() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_rink_tables()
        .with_token_endpoint("github", "access_token", 0)
        .build()
        .await?;
    let state = test.into_app_state();
    SessionAuthCsrf::insert(&test.session, "csrf_state")
        .await
        .unwrap();

    let resp = callback(
        State(state),
        test.session.clone(),
        Path("github".to_string()),
        callback_params("forged_state"),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(SessionUserId::get(&test.session).await.unwrap().is_none());
    test.assert_mocks();

    Ok(())
}

/// Expect 400 when the provider doesn't share an email
#[tokio::test]
async fn callback_requires_email() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_rink_tables()
        .with_token_endpoint("facebook", "access_token", 1)
        .with_userinfo_endpoint("facebook", json!({"id": "fb-1"}), 1)
        .build()
        .await?;
    let state = test.into_app_state();
    SessionAuthCsrf::insert(&test.session, "csrf_state")
        .await
        .unwrap();

    let resp = callback(
        State(state),
        test.session.clone(),
        Path("facebook".to_string()),
        callback_params("csrf_state"),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    test.assert_mocks();

    Ok(())
}

/// Expect 401 for anonymous requests
#[tokio::test]
async fn get_user_requires_login() -> Result<(), TestError> {
    let test = test_setup_with_rink_tables!()?;
    let state = test.into_app_state();

    let resp = get_user(State(state), anonymous_session())
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect logout to clear the user from session
#[tokio::test]
async fn logout_clears_session() -> Result<(), TestError> {
    let mut test = test_setup_with_rink_tables!()?;
    let user = test.user().insert_user("a@example.com").await?;
    let session = session_for(user.id).await;

    let resp = logout(session.clone()).await.into_response();

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert!(SessionUserId::get(&session).await.unwrap().is_none());

    Ok(())
}
