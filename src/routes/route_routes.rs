use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Extension, Json, Router,
};
use serde::Deserialize;

use crate::controllers::route_controller::RouteController;
use crate::dto::route_dto::{RouteResponse, SaveRouteRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::services::poi_service::{parse_poi_types, PoiService, DEFAULT_RADIUS_M};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/routes", post(save_route))
        .route("/lorry/:id/route", get(latest_route))
        .route("/lorry/:id/route/clear", delete(clear_routes))
        .route("/lorry/:id/pois", get(pois_along_route))
}

async fn save_route(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<SaveRouteRequest>,
) -> Result<(StatusCode, Json<RouteResponse>), AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.save(&user, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn latest_route(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let controller = RouteController::new(state.pool.clone());
    match controller.latest(id).await? {
        Some(route) => Ok((StatusCode::OK, Json(route)).into_response()),
        // A lorry with no stored routes is a valid, empty answer.
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

async fn clear_routes(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let controller = RouteController::new(state.pool.clone());
    controller.clear(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
struct PoiQuery {
    radius_m: Option<u32>,
    types: Option<String>,
}

async fn pois_along_route(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<PoiQuery>,
) -> Result<Response, AppError> {
    let types = parse_poi_types(query.types.as_deref().unwrap_or("fuel,toll"))?;
    let radius_m = query.radius_m.unwrap_or(DEFAULT_RADIUS_M);

    let controller = RouteController::new(state.pool.clone());
    let Some(path) = controller.latest_path(id).await? else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let service = PoiService::new(state.config.overpass_url.clone())?;
    let collection = service.pois_along_route(&path, radius_m, &types).await?;

    Ok((StatusCode::OK, Json(collection)).into_response())
}
