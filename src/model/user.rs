use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub email: String,
    /// Rink the user coordinates or volunteers for, if any
    pub rink_id: Option<i32>,
    pub is_administrator: bool,
    pub is_coordinator: bool,
}

/// Body of the testing-only login route.
///
/// Accepts both snake_case and camelCase role flags as sent by the browser test suite.
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TestLoginDto {
    pub email: String,
    #[serde(default, alias = "isAdministrator")]
    pub is_administrator: bool,
    #[serde(default, alias = "isCoordinator")]
    pub is_coordinator: bool,
}
