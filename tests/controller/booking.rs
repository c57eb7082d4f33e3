use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use rinkbook::{
    model::{
        api::ErrorDto,
        booking::{BookingDto, BookingRequestDto},
    },
    server::controller::booking::{book, get_user_bookings},
};
use sea_orm::{EntityTrait, PaginatorTrait};

use super::*;

fn request(rink_id: i32, hour: i32) -> Json<BookingRequestDto> {
    Json(BookingRequestDto {
        rink_id,
        hour,
        group_size: 1,
    })
}

/// Expect the second user to find the single-capacity slot full after the first books it
#[tokio::test]
async fn second_user_finds_slot_full() -> Result<(), TestError> {
    let mut test = test_setup_with_rink_tables!()?;
    let rink = test.rink().insert_rink("Dufferin Grove", 1, 8, 22).await?;
    let user_a = test.user().insert_user("a@example.com").await?;
    let user_b = test.user().insert_user("b@example.com").await?;
    let state = test.into_app_state();

    let resp = book(
        State(state.clone()),
        session_for(user_a.id).await,
        request(rink.id, 21),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let booking: BookingDto = body_json(resp).await;
    assert_eq!(booking.rink.id, rink.id);
    assert_eq!(booking.user.id, user_a.id);
    assert_eq!(booking.hour, 21);
    assert_eq!(booking.time, "21:00");

    let resp = book(
        State(state),
        session_for(user_b.id).await,
        request(rink.id, 21),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let error: ErrorDto = body_json(resp).await;
    assert_eq!(error.error, "Timeslot booked already");

    let bookings = entity::prelude::RinkBooking::find().count(&test.db).await?;
    assert_eq!(bookings, 1);

    Ok(())
}

/// Expect 403 when the user repeats a booking
#[tokio::test]
async fn repeated_request_is_already_booked() -> Result<(), TestError> {
    let mut test = test_setup_with_rink_tables!()?;
    let rink = test.rink().insert_rink("Dufferin Grove", 25, 8, 22).await?;
    let user = test.user().insert_user("a@example.com").await?;
    let state = test.into_app_state();
    let session = session_for(user.id).await;

    let first = book(State(state.clone()), session.clone(), request(rink.id, 12))
        .await
        .into_response();
    let second = book(State(state), session, request(rink.id, 12))
        .await
        .into_response();

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::FORBIDDEN);
    let error: ErrorDto = body_json(second).await;
    assert_eq!(error.error, "Have already booked this timeslot");

    Ok(())
}

/// Expect the booking response to carry the rink's current status
#[tokio::test]
async fn booking_response_includes_rink_status() -> Result<(), TestError> {
    let mut test = test_setup_with_rink_tables!()?;
    let rink = test.rink().insert_rink("Dufferin Grove", 25, 8, 22).await?;
    let user = test.user().insert_user("a@example.com").await?;
    let now = test.now.naive_utc();
    test.status()
        .insert_status(rink.id, true, "Good ice", now, None)
        .await?;
    let state = test.into_app_state();

    let resp = book(State(state), session_for(user.id).await, request(rink.id, 12))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let booking: BookingDto = body_json(resp).await;
    let status = booking.rink.status.expect("booked rink should have a status");
    assert!(status.is_open);
    assert_eq!(status.state, "Good ice");

    Ok(())
}

/// Expect a repeat at the daily limit to report the existing booking, not the limit
#[tokio::test]
async fn repeat_at_quota_is_already_booked() -> Result<(), TestError> {
    let mut test = test_setup_with_rink_tables!()?;
    let rink = test.rink().insert_rink("Dufferin Grove", 25, 8, 22).await?;
    let user = test.user().insert_user("a@example.com").await?;
    let state = test.into_app_state();
    let session = session_for(user.id).await;

    for hour in [9, 10, 11] {
        let resp = book(State(state.clone()), session.clone(), request(rink.id, hour))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = book(State(state), session, request(rink.id, 11))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let error: ErrorDto = body_json(resp).await;
    assert_eq!(error.error, "Have already booked this timeslot");

    Ok(())
}

/// Expect the fourth booking of the day to exceed the daily limit of 3
#[tokio::test]
async fn fourth_booking_exceeds_quota() -> Result<(), TestError> {
    let mut test = test_setup_with_rink_tables!()?;
    let rink = test.rink().insert_rink("Dufferin Grove", 25, 8, 22).await?;
    let user = test.user().insert_user("a@example.com").await?;
    let state = test.into_app_state();
    let session = session_for(user.id).await;

    for hour in [9, 10, 11] {
        let resp = book(State(state.clone()), session.clone(), request(rink.id, hour))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = book(State(state), session, request(rink.id, 12))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let error: ErrorDto = body_json(resp).await;
    assert_eq!(error.error, "Have booked too many timeslots today");

    Ok(())
}

#[tokio::test]
async fn missing_rink_is_not_found() -> Result<(), TestError> {
    let mut test = test_setup_with_rink_tables!()?;
    let user = test.user().insert_user("a@example.com").await?;
    let state = test.into_app_state();

    let resp = book(State(state), session_for(user.id).await, request(99, 12))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect 400 for an hour outside 0-23
#[tokio::test]
async fn invalid_hour_is_bad_request() -> Result<(), TestError> {
    let mut test = test_setup_with_rink_tables!()?;
    let rink = test.rink().insert_rink("Dufferin Grove", 25, 8, 22).await?;
    let user = test.user().insert_user("a@example.com").await?;
    let state = test.into_app_state();

    let resp = book(State(state), session_for(user.id).await, request(rink.id, 24))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 401 for anonymous booking requests, no booking is written
#[tokio::test]
async fn anonymous_booking_is_unauthorized() -> Result<(), TestError> {
    let mut test = test_setup_with_rink_tables!()?;
    let rink = test.rink().insert_rink("Dufferin Grove", 25, 8, 22).await?;
    let state = test.into_app_state();

    let resp = book(State(state), anonymous_session(), request(rink.id, 12))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let error: ErrorDto = body_json(resp).await;
    assert_eq!(error.error, "API requires logged-in user");
    let bookings = entity::prelude::RinkBooking::find().count(&test.db).await?;
    assert_eq!(bookings, 0);

    Ok(())
}

/// Expect today's bookings across rinks in start order
#[tokio::test]
async fn lists_user_bookings_today() -> Result<(), TestError> {
    let mut test = test_setup_with_rink_tables!()?;
    let dufferin = test.rink().insert_rink("Dufferin Grove", 25, 8, 22).await?;
    let trinity = test.rink().insert_rink("Trinity Bellwoods", 25, 8, 22).await?;
    let user = test.user().insert_user("a@example.com").await?;
    let other = test.user().insert_user("b@example.com").await?;
    test.booking()
        .insert_booking_at_hour(trinity.id, user.id, 15)
        .await?;
    test.booking()
        .insert_booking_at_hour(dufferin.id, user.id, 12)
        .await?;
    test.booking()
        .insert_booking_at_hour(dufferin.id, other.id, 13)
        .await?;
    let now = test.now.naive_utc();
    test.status()
        .insert_status(dufferin.id, true, "Busy", now, None)
        .await?;
    let state = test.into_app_state();

    let resp = get_user_bookings(State(state), session_for(user.id).await)
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let bookings: Vec<BookingDto> = body_json(resp).await;
    let summary: Vec<(i32, u32)> = bookings.iter().map(|b| (b.rink.id, b.hour)).collect();
    assert_eq!(summary, vec![(dufferin.id, 12), (trinity.id, 15)]);
    let states: Vec<Option<String>> = bookings
        .iter()
        .map(|b| b.rink.status.as_ref().map(|s| s.state.clone()))
        .collect();
    assert_eq!(states, vec![Some("Busy".to_string()), None]);

    Ok(())
}
