//! Shared utilities
//!
//! Error types, geometry normalization and JWT helpers used across the
//! controllers and services.

pub mod errors;
pub mod geometry;
pub mod jwt;
