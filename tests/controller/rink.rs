use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rinkbook::{
    model::rink::{CreateRinkDto, CreateStatusDto, RinkDetailDto, RinkDto, StatusDto},
    server::controller::rink::{create_rink, get_rink, list_rinks, update_status},
};

use super::*;

fn new_rink(name: &str) -> CreateRinkDto {
    CreateRinkDto {
        name: name.to_string(),
        capacity: 10,
        max_groups: 10,
        open_hour: 8,
        close_hour: 22,
        map_link: None,
    }
}

fn new_status(state: &str) -> CreateStatusDto {
    CreateStatusDto {
        is_open: true,
        state: state.to_string(),
        description: None,
    }
}

/// Expect rinks ordered by name with their current status
#[tokio::test]
async fn lists_rinks_with_status() -> Result<(), TestError> {
    let mut test = test_setup_with_rink_tables!()?;
    let trinity = test.rink().insert_rink("Trinity Bellwoods", 25, 8, 22).await?;
    let dufferin = test.rink().insert_rink("Dufferin Grove", 25, 8, 22).await?;
    let now = test.now.naive_utc();
    test.status()
        .insert_status(trinity.id, false, "Closed for flooding", now, None)
        .await?;
    let state = test.into_app_state();

    let resp = list_rinks(State(state)).await.into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let rinks: Vec<RinkDto> = body_json(resp).await;
    assert_eq!(rinks.len(), 2);
    assert_eq!(rinks[0].id, dufferin.id);
    assert!(rinks[0].status.is_none());
    assert_eq!(rinks[1].id, trinity.id);
    let status = rinks[1].status.as_ref().unwrap();
    assert!(!status.is_open);
    assert_eq!(status.state, "Closed for flooding");

    Ok(())
}

/// Expect 14 timeslots for a rink open 8-22, with the user's booking marked
#[tokio::test]
async fn rink_detail_has_todays_timeslots() -> Result<(), TestError> {
    let mut test = test_setup_with_rink_tables!()?;
    let rink = test.rink().insert_rink("Dufferin Grove", 2, 8, 22).await?;
    let user = test.user().insert_user("a@example.com").await?;
    let other = test.user().insert_user("b@example.com").await?;
    test.booking()
        .insert_booking_at_hour(rink.id, user.id, 12)
        .await?;
    test.booking()
        .insert_booking_at_hour(rink.id, other.id, 12)
        .await?;
    let state = test.into_app_state();

    let resp = get_rink(State(state), session_for(user.id).await, Path(rink.id))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let detail: RinkDetailDto = body_json(resp).await;
    assert_eq!(detail.timeslots.len(), 14);
    let hours: Vec<u32> = detail.timeslots.iter().map(|s| s.hour).collect();
    assert_eq!(hours, (8..22).collect::<Vec<u32>>());

    let noon = &detail.timeslots[4];
    assert_eq!(noon.hour, 12);
    assert_eq!(noon.occupied_count, 2);
    assert!(noon.is_full);
    assert!(noon.user_has_booked);
    assert!(!detail.timeslots[5].user_has_booked);
    assert_eq!(detail.timeslots[5].occupied_count, 0);

    Ok(())
}

#[tokio::test]
async fn rink_detail_not_found() -> Result<(), TestError> {
    let test = test_setup_with_rink_tables!()?;
    let state = test.into_app_state();

    let resp = get_rink(State(state), anonymous_session(), Path(42))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect administrators to create rinks
#[tokio::test]
async fn administrator_creates_rink() -> Result<(), TestError> {
    let mut test = test_setup_with_rink_tables!()?;
    let admin = test
        .user()
        .insert_user_with_roles("admin@example.com", true, false)
        .await?;
    let state = test.into_app_state();

    let resp = create_rink(
        State(state),
        session_for(admin.id).await,
        Json(new_rink("Wallace Emerson")),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let rink: RinkDto = body_json(resp).await;
    assert_eq!(rink.name, "Wallace Emerson");
    assert_eq!(rink.capacity, 10);

    Ok(())
}

/// Expect 403 for coordinators creating rinks
#[tokio::test]
async fn coordinator_cannot_create_rink() -> Result<(), TestError> {
    let mut test = test_setup_with_rink_tables!()?;
    let coordinator = test
        .user()
        .insert_user_with_roles("coord@example.com", false, true)
        .await?;
    let state = test.into_app_state();

    let resp = create_rink(
        State(state),
        session_for(coordinator.id).await,
        Json(new_rink("Wallace Emerson")),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect 400 for a rink closing before it opens
#[tokio::test]
async fn rejects_invalid_hours() -> Result<(), TestError> {
    let mut test = test_setup_with_rink_tables!()?;
    let admin = test
        .user()
        .insert_user_with_roles("admin@example.com", true, false)
        .await?;
    let state = test.into_app_state();
    let mut rink = new_rink("Wallace Emerson");
    rink.open_hour = 22;
    rink.close_hour = 8;

    let resp = create_rink(State(state), session_for(admin.id).await, Json(rink))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect a posted status to become the rink's current status
#[tokio::test]
async fn coordinator_updates_status() -> Result<(), TestError> {
    let mut test = test_setup_with_rink_tables!()?;
    let rink = test.rink().insert_rink("Dufferin Grove", 25, 8, 22).await?;
    let coordinator = test
        .user()
        .insert_user_with_roles("coord@example.com", false, true)
        .await?;
    let state = test.into_app_state();

    let resp = update_status(
        State(state.clone()),
        session_for(coordinator.id).await,
        Path(rink.id),
        Json(new_status("Good ice")),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let status: StatusDto = body_json(resp).await;
    assert!(status.end_date.is_none());

    let resp = list_rinks(State(state)).await.into_response();
    let rinks: Vec<RinkDto> = body_json(resp).await;
    assert_eq!(rinks[0].status.as_ref().map(|s| s.id), Some(status.id));

    Ok(())
}

/// Expect 403 for skaters without a role
#[tokio::test]
async fn skater_cannot_update_status() -> Result<(), TestError> {
    let mut test = test_setup_with_rink_tables!()?;
    let rink = test.rink().insert_rink("Dufferin Grove", 25, 8, 22).await?;
    let user = test.user().insert_user("a@example.com").await?;
    let state = test.into_app_state();

    let resp = update_status(
        State(state),
        session_for(user.id).await,
        Path(rink.id),
        Json(new_status("Good ice")),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect 401 for anonymous status updates
#[tokio::test]
async fn anonymous_cannot_update_status() -> Result<(), TestError> {
    let mut test = test_setup_with_rink_tables!()?;
    let rink = test.rink().insert_rink("Dufferin Grove", 25, 8, 22).await?;
    let state = test.into_app_state();

    let resp = update_status(
        State(state),
        anonymous_session(),
        Path(rink.id),
        Json(new_status("Good ice")),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
