use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::models::lorry_route::LorryRoute;
use crate::utils::geometry::{path_to_latlon, point_to_latlon};

/// Route save body. `path` and `destination` stay untyped until the geometry
/// normalizer validates them, so malformed pairs come back as 400s with a
/// useful message instead of a deserializer rejection.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveRouteRequest {
    #[serde(alias = "lorry_id")]
    pub lorry: Option<i64>,
    pub path: Option<Value>,
    pub destination: Option<Value>,
    #[validate(range(min = 0))]
    pub travel_time_seconds: Option<i32>,
    #[validate(range(min = 0))]
    pub distance_meters: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub id: i64,
    pub lorry: i64,
    pub lorry_name: String,
    /// Ordered `[lat, lon]` pairs, external order.
    pub path: Vec<[f64; 2]>,
    /// `[lat, lon]`, external order.
    pub destination: [f64; 2],
    pub travel_time_seconds: Option<i32>,
    pub distance_meters: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl RouteResponse {
    pub fn from_model(route: &LorryRoute, lorry_name: &str) -> Self {
        Self {
            id: route.id,
            lorry: route.lorry_id,
            lorry_name: lorry_name.to_string(),
            path: path_to_latlon(&route.path.0),
            destination: point_to_latlon(&route.destination.0),
            travel_time_seconds: route.travel_time_seconds,
            distance_meters: route.distance_meters,
            created_at: route.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::types::Json;

    #[test]
    fn route_response_projects_external_order() {
        let route = LorryRoute {
            id: 3,
            lorry_id: 5,
            path: Json(vec![(-6.26, 53.35), (-6.3, 53.4)]),
            destination: Json((-7.25, 54.0)),
            travel_time_seconds: Some(3600),
            distance_meters: Some(90_000),
            created_at: chrono::Utc::now(),
        };

        let response = RouteResponse::from_model(&route, "Lorry5Cavan");
        assert_eq!(response.path, vec![[53.35, -6.26], [53.4, -6.3]]);
        assert_eq!(response.destination, [54.0, -7.25]);
        assert_eq!(response.lorry_name, "Lorry5Cavan");
    }

    #[test]
    fn negative_travel_time_fails_validation() {
        let request = SaveRouteRequest {
            lorry: Some(5),
            path: None,
            destination: None,
            travel_time_seconds: Some(-1),
            distance_meters: None,
        };
        assert!(request.validate().is_err());
    }
}
