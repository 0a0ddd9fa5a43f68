//! Request/response types
//!
//! Serde structs for the HTTP surface plus the typed projection functions
//! that turn models into API representations. External coordinate order is
//! always `[lat, lon]`; the projections go through the geometry normalizer.

pub mod auth_dto;
pub mod location_dto;
pub mod lorry_dto;
pub mod poi_dto;
pub mod route_dto;
