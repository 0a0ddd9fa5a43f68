//! Legacy ingest-token middleware
//!
//! Older GPS feeders authenticate with a shared `X-INGEST-TOKEN` header
//! instead of a user token. The two trust models stay separate: this
//! middleware guards only the ingest endpoint, marks token callers with
//! `LegacyIngest`, and falls through to JWT authentication otherwise.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::middleware::auth::authenticate_bearer;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub const INGEST_TOKEN_HEADER: &str = "x-ingest-token";

/// Marker extension for requests admitted via the shared token.
#[derive(Debug, Clone, Copy)]
pub struct LegacyIngest;

pub async fn ingest_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let presented = request
        .headers()
        .get(INGEST_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string());

    if let Some(presented) = presented {
        // Only honored when the deployment configures a token at all.
        match &state.config.ingest_token {
            Some(expected) if &presented == expected => {
                tracing::debug!("Ingest request admitted via legacy token");
                request.extensions_mut().insert(LegacyIngest);
                return Ok(next.run(request).await);
            }
            _ => {
                return Err(AppError::Unauthorized("Invalid ingest token".to_string()));
            }
        }
    }

    let user = authenticate_bearer(&state, request.headers()).await?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
