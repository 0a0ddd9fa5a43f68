//! External service clients and aggregation
//!
//! Each client owns a `reqwest::Client` built with its own timeout; calls are
//! single-attempt and fail fast.

pub mod overpass_service;
pub mod poi_service;
pub mod routing_service;
