//! Business logic
//!
//! Controllers hold the repositories they need and receive identity and
//! configuration as explicit parameters; no ambient state.

pub mod access_control;
pub mod auth_controller;
pub mod location_controller;
pub mod lorry_controller;
pub mod route_controller;
