//! Tests for HTTP controller endpoints.
//!
//! Handlers are called directly with state, session and extracted request parts, the
//! results are converted into responses the way axum would.

mod auth;
mod booking;
mod rink;
mod testing;

use rinkbook_test_utils::prelude::*;

use crate::util::{anonymous_session, body_json, session_for};
use crate::TestContextExt;
