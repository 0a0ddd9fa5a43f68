//! Location ingest and latest-state queries

use serde_json::Value;
use sqlx::PgPool;

use crate::controllers::access_control::AccessControl;
use crate::dto::location_dto::{IngestLocationRequest, LocationResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::repositories::location_repository::LocationRepository;
use crate::repositories::lorry_repository::LorryRepository;
use crate::utils::errors::AppError;

/// Who is calling ingest. The legacy token path predates identity-based
/// authorization and skips the per-lorry ownership gate; the two are never
/// mixed.
pub enum IngestCaller {
    Identity(AuthenticatedUser),
    LegacyToken,
}

pub struct LocationController {
    lorries: LorryRepository,
    locations: LocationRepository,
    access: AccessControl,
}

/// Lenient float parse: JSON number or numeric string. Feeder hardware is
/// inconsistent about which one it sends.
fn parse_coordinate(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_lorry_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// WGS84 bounds: lat in [-90, 90], lon in [-180, 180].
fn validate_coordinates(lat: f64, lon: f64) -> Result<(), AppError> {
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(AppError::Validation("lat/lon out of range".to_string()));
    }
    Ok(())
}

impl LocationController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            lorries: LorryRepository::new(pool.clone()),
            locations: LocationRepository::new(pool.clone()),
            access: AccessControl::new(pool),
        }
    }

    /// Append one GPS observation. Validation happens up front; nothing is
    /// written unless every check passes.
    pub async fn ingest(
        &self,
        caller: IngestCaller,
        request: IngestLocationRequest,
    ) -> Result<LocationResponse, AppError> {
        // Target lorry: explicit id, else the caller's own linked lorry.
        let lorry_id = match &request.lorry_id {
            Some(value) => parse_lorry_id(value)
                .ok_or_else(|| AppError::Validation("lorry_id must be an integer".to_string()))?,
            None => match &caller {
                IngestCaller::Identity(user) => self
                    .lorries
                    .find_by_owner(user.user_id)
                    .await?
                    .map(|lorry| lorry.id)
                    .ok_or_else(|| AppError::Validation("lorry_id is required".to_string()))?,
                IngestCaller::LegacyToken => {
                    return Err(AppError::Validation("lorry_id is required".to_string()))
                }
            },
        };

        let lat = parse_coordinate(request.lat.as_ref())
            .ok_or_else(|| AppError::Validation("lat and lon must be numeric".to_string()))?;
        let lon = parse_coordinate(request.lon.as_ref())
            .ok_or_else(|| AppError::Validation("lat and lon must be numeric".to_string()))?;

        validate_coordinates(lat, lon)?;

        let lorry = self
            .lorries
            .find_by_id(lorry_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Lorry {} not found", lorry_id)))?;

        if let IngestCaller::Identity(user) = &caller {
            self.access.authorize(user, &lorry).await?;
        }

        let county = request.current_county.unwrap_or_default();
        let location = self.locations.insert(lorry.id, lon, lat, &county).await?;

        log::info!(
            "📍 Location ingested for lorry {} ('{}') at ({}, {})",
            lorry.id,
            lorry.name,
            lat,
            lon
        );

        Ok(LocationResponse::from_model(&location, &lorry.name))
    }

    pub async fn list_all(&self) -> Result<Vec<LocationResponse>, AppError> {
        let rows = self.locations.list_all().await?;
        Ok(rows.iter().map(LocationResponse::from_row).collect())
    }

    /// The live-map query: one location per lorry, the newest one. Lorries
    /// that have never pinged are omitted.
    pub async fn latest_per_lorry(&self) -> Result<Vec<LocationResponse>, AppError> {
        let rows = self.locations.latest_per_lorry().await?;
        Ok(rows.iter().map(LocationResponse::from_row).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coordinates_parse_from_numbers_and_strings() {
        assert_eq!(parse_coordinate(Some(&json!(53.35))), Some(53.35));
        assert_eq!(parse_coordinate(Some(&json!("-6.26"))), Some(-6.26));
        assert_eq!(parse_coordinate(Some(&json!(" 53.35 "))), Some(53.35));
        assert_eq!(parse_coordinate(Some(&json!("north"))), None);
        assert_eq!(parse_coordinate(Some(&json!(null))), None);
        assert_eq!(parse_coordinate(None), None);
    }

    #[test]
    fn lorry_id_parses_from_number_and_string() {
        assert_eq!(parse_lorry_id(&json!(5)), Some(5));
        assert_eq!(parse_lorry_id(&json!("5")), Some(5));
        assert_eq!(parse_lorry_id(&json!(5.5)), None);
        assert_eq!(parse_lorry_id(&json!([5])), None);
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        assert!(matches!(
            validate_coordinates(91.0, 0.0),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            validate_coordinates(0.0, 181.0),
            Err(AppError::Validation(_))
        ));
        assert!(validate_coordinates(-91.0, 0.0).is_err());
        assert!(validate_coordinates(0.0, -181.0).is_err());
    }

    #[test]
    fn in_range_coordinates_are_accepted() {
        assert!(validate_coordinates(53.35, -6.26).is_ok());
        // Boundary values are valid.
        assert!(validate_coordinates(90.0, 180.0).is_ok());
        assert!(validate_coordinates(-90.0, -180.0).is_ok());
    }
}
