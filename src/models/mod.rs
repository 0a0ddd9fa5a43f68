//! Data models
//!
//! Structs mapping 1:1 to the PostgreSQL schema. Locations and routes are
//! append-only: rows are created, never updated.

pub mod location;
pub mod lorry;
pub mod lorry_route;
pub mod user;
