use axum::{extract::Query, extract::State, routing::get, Json, Router};
use serde::Deserialize;

use crate::services::routing_service::{parse_latlon_param, RoutingService};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_routing_proxy_router() -> Router<AppState> {
    Router::new().route("/route", get(calculate_route))
}

#[derive(Debug, Deserialize)]
struct RouteProxyQuery {
    origin: Option<String>,
    dest: Option<String>,
}

async fn calculate_route(
    State(state): State<AppState>,
    Query(query): Query<RouteProxyQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let origin_raw = query
        .origin
        .ok_or_else(|| AppError::Validation("origin is required".to_string()))?;
    let dest_raw = query
        .dest
        .ok_or_else(|| AppError::Validation("dest is required".to_string()))?;

    let origin = parse_latlon_param("origin", &origin_raw)?;
    let dest = parse_latlon_param("dest", &dest_raw)?;

    let api_key = state
        .config
        .tomtom_api_key
        .clone()
        .ok_or_else(|| AppError::Misconfigured("Routing API key not configured".to_string()))?;

    let service = RoutingService::new(api_key)?;
    let upstream = service.calculate_route(origin, dest).await?;

    Ok(Json(upstream))
}
