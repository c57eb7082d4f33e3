//! Server application core modules.
//!
//! This module contains all server-side functionality for Rinkbook: configuration, HTTP
//! routing and controllers, OAuth login, session handling, the SeaORM data layer and the
//! services implementing the slot calendar and booking admission.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
