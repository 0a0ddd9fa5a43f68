use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::location_controller::{IngestCaller, LocationController};
use crate::dto::location_dto::{IngestLocationRequest, LocationResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::middleware::ingest_token::LegacyIngest;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_location_router() -> Router<AppState> {
    Router::new()
        .route("/locations", get(list_locations))
        .route("/latest-locations", get(latest_locations))
}

/// Separate router: ingest is the one endpoint that also accepts the legacy
/// shared-token path, so it carries its own middleware.
pub fn create_ingest_router() -> Router<AppState> {
    Router::new().route("/ingest-location", post(ingest_location))
}

async fn list_locations(
    State(state): State<AppState>,
) -> Result<Json<Vec<LocationResponse>>, AppError> {
    let controller = LocationController::new(state.pool.clone());
    Ok(Json(controller.list_all().await?))
}

async fn latest_locations(
    State(state): State<AppState>,
) -> Result<Json<Vec<LocationResponse>>, AppError> {
    let controller = LocationController::new(state.pool.clone());
    Ok(Json(controller.latest_per_lorry().await?))
}

async fn ingest_location(
    State(state): State<AppState>,
    user: Option<Extension<AuthenticatedUser>>,
    legacy: Option<Extension<LegacyIngest>>,
    Json(request): Json<IngestLocationRequest>,
) -> Result<(StatusCode, Json<LocationResponse>), AppError> {
    let caller = if let Some(Extension(user)) = user {
        IngestCaller::Identity(user)
    } else if legacy.is_some() {
        IngestCaller::LegacyToken
    } else {
        return Err(AppError::Unauthorized(
            "Authentication required".to_string(),
        ));
    };

    let controller = LocationController::new(state.pool.clone());
    let response = controller.ingest(caller, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
