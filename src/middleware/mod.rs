//! Request middleware
//!
//! JWT authentication, the legacy ingest-token path and CORS.

pub mod auth;
pub mod cors;
pub mod ingest_token;

pub use auth::*;
pub use cors::*;
pub use ingest_token::*;
