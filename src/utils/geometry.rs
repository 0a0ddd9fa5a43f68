//! Geometry normalization
//!
//! The API speaks `[lat, lon]` pairs (the order map clients use); storage
//! keeps `(lon, lat)` ordered pairs, matching the x/y convention of the
//! geometry columns. Every conversion between the two lives here.

use serde_json::Value;

use crate::utils::errors::AppError;

/// Internal ordered pair: `(longitude, latitude)`.
pub type LonLat = (f64, f64);

fn pair_from_value(value: &Value) -> Result<LonLat, AppError> {
    let pair = value
        .as_array()
        .ok_or_else(|| AppError::Validation("coordinate pair must be an array".to_string()))?;

    if pair.len() != 2 {
        return Err(AppError::Validation(
            "coordinate pair must have exactly 2 values".to_string(),
        ));
    }

    let lat = pair[0]
        .as_f64()
        .ok_or_else(|| AppError::Validation("coordinate values must be numeric".to_string()))?;
    let lon = pair[1]
        .as_f64()
        .ok_or_else(|| AppError::Validation("coordinate values must be numeric".to_string()))?;

    if !lat.is_finite() || !lon.is_finite() {
        return Err(AppError::Validation(
            "coordinate values must be finite".to_string(),
        ));
    }

    Ok((lon, lat))
}

/// Convert one external `[lat, lon]` pair to an internal `(lon, lat)` point.
pub fn point_from_latlon(value: &Value) -> Result<LonLat, AppError> {
    pair_from_value(value)
}

/// Convert an external list of `[lat, lon]` pairs to an internal path.
/// Order and count are preserved exactly; a path needs at least 2 points.
pub fn path_from_latlon(value: &Value) -> Result<Vec<LonLat>, AppError> {
    let pairs = value
        .as_array()
        .ok_or_else(|| AppError::Validation("path must be an array of [lat, lon] pairs".to_string()))?;

    if pairs.len() < 2 {
        return Err(AppError::Validation(
            "path must contain at least 2 points".to_string(),
        ));
    }

    pairs.iter().map(pair_from_value).collect()
}

/// Project an internal point back to the external `[lat, lon]` order.
pub fn point_to_latlon(point: &LonLat) -> [f64; 2] {
    [point.1, point.0]
}

/// Project an internal path back to external `[lat, lon]` pairs.
pub fn path_to_latlon(path: &[LonLat]) -> Vec<[f64; 2]> {
    path.iter().map(point_to_latlon).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn point_swaps_to_lon_lat() {
        let point = point_from_latlon(&json!([53.35, -6.26])).unwrap();
        assert_eq!(point, (-6.26, 53.35));
    }

    #[test]
    fn path_round_trip_is_identity() {
        let external = json!([[53.35, -6.26], [53.4, -6.3], [54.0, -7.25]]);
        let path = path_from_latlon(&external).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], (-6.26, 53.35));

        let back = path_to_latlon(&path);
        assert_eq!(serde_json::to_value(back).unwrap(), external);
    }

    #[test]
    fn path_rejects_fewer_than_two_points() {
        let err = path_from_latlon(&json!([[53.35, -6.26]])).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn pair_rejects_wrong_arity() {
        assert!(point_from_latlon(&json!([53.35])).is_err());
        assert!(point_from_latlon(&json!([53.35, -6.26, 12.0])).is_err());
    }

    #[test]
    fn pair_rejects_non_numeric_values() {
        assert!(point_from_latlon(&json!(["53.35", -6.26])).is_err());
        assert!(point_from_latlon(&json!(null)).is_err());
    }
}
