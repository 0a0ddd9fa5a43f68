//! Data access layer
//!
//! One repository per aggregate, each holding a `PgPool` and issuing plain
//! sqlx queries. Controllers never touch SQL directly.

pub mod location_repository;
pub mod lorry_repository;
pub mod route_repository;
pub mod user_repository;
