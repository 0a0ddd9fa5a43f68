use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::location::Location;
use crate::repositories::location_repository::LocationWithLorry;
use crate::utils::geometry::point_to_latlon;

/// Ingest body. Field aliases keep older feeder scripts working; values stay
/// untyped here because lat/lon may arrive as JSON numbers or numeric
/// strings, and the controller owns the parse errors.
#[derive(Debug, Default, Deserialize)]
pub struct IngestLocationRequest {
    #[serde(alias = "lorry")]
    pub lorry_id: Option<Value>,
    #[serde(alias = "latitude")]
    pub lat: Option<Value>,
    #[serde(alias = "longitude")]
    pub lon: Option<Value>,
    #[serde(alias = "county")]
    pub current_county: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub id: i64,
    pub lorry: i64,
    pub lorry_name: String,
    /// `[lat, lon]`, external order.
    pub point: [f64; 2],
    pub current_county: String,
    pub timestamp: DateTime<Utc>,
}

impl LocationResponse {
    pub fn from_model(location: &Location, lorry_name: &str) -> Self {
        Self {
            id: location.id,
            lorry: location.lorry_id,
            lorry_name: lorry_name.to_string(),
            point: point_to_latlon(&(location.lon, location.lat)),
            current_county: location.current_county.clone(),
            timestamp: location.timestamp,
        }
    }

    pub fn from_row(row: &LocationWithLorry) -> Self {
        Self {
            id: row.id,
            lorry: row.lorry_id,
            lorry_name: row.lorry_name.clone(),
            point: point_to_latlon(&(row.lon, row.lat)),
            current_county: row.current_county.clone(),
            timestamp: row.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ingest_request_accepts_aliases() {
        let request: IngestLocationRequest = serde_json::from_value(json!({
            "lorry": 5,
            "latitude": "53.35",
            "longitude": -6.26,
            "county": "Dublin"
        }))
        .unwrap();

        assert_eq!(request.lorry_id, Some(json!(5)));
        assert_eq!(request.lat, Some(json!("53.35")));
        assert_eq!(request.lon, Some(json!(-6.26)));
        assert_eq!(request.current_county.as_deref(), Some("Dublin"));
    }

    #[test]
    fn location_response_serializes_lat_lon_order() {
        let location = Location {
            id: 1,
            lorry_id: 5,
            lon: -6.26,
            lat: 53.35,
            current_county: "Dublin".to_string(),
            timestamp: chrono::Utc::now(),
        };

        let response = LocationResponse::from_model(&location, "Lorry5Cavan");
        assert_eq!(response.point, [53.35, -6.26]);
        assert_eq!(response.lorry_name, "Lorry5Cavan");
    }
}
