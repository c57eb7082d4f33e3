//! HTTP routing and OpenAPI documentation configuration.
//!
//! Every endpoint is registered with its utoipa path annotation, the collected OpenAPI
//! document is served at `/api/docs/openapi.json` with Swagger UI at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `GET /api/auth/providers` - Enabled OAuth providers
/// - `GET /login/{provider}` - Redirect to the provider's login page
/// - `GET /login/{provider}/authorized` - OAuth callback
/// - `GET /logout` - Logout current user
/// - `GET /api/auth/user` - Current user
/// - `GET /api/rinks`, `POST /api/rinks` - List or create rinks
/// - `GET /api/rinks/{rink_id}` - Rink with today's timeslots
/// - `POST /api/rinks/{rink_id}/status` - Post a rink status
/// - `POST /rink/book` - Book a timeslot
/// - `GET /api/user/bookings` - Current user's bookings today
/// - `POST /testing/api/login` - Testing login
///
/// # Example
/// ```ignore
/// let router = routes().with_state(app_state).layer(session);
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Rinkbook", description = "Rinkbook API"), tags(
        (name = controller::auth::AUTH_TAG, description = "Authentication API routes"),
        (name = controller::rink::RINK_TAG, description = "Rinks, statuses and timeslots"),
        (name = controller::booking::BOOKING_TAG, description = "Timeslot bookings"),
        (name = controller::testing::TESTING_TAG, description = "Routes only enabled for browser tests"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::auth::providers))
        .routes(routes!(controller::auth::login))
        .routes(routes!(controller::auth::callback))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::auth::get_user))
        .routes(routes!(
            controller::rink::list_rinks,
            controller::rink::create_rink
        ))
        .routes(routes!(controller::rink::get_rink))
        .routes(routes!(controller::rink::update_status))
        .routes(routes!(controller::booking::book))
        .routes(routes!(controller::booking::get_user_bookings))
        .routes(routes!(controller::testing::testing_login))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
