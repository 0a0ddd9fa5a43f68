//! Routing provider proxy
//!
//! Pass-through to the TomTom calculateRoute API: one attempt, 10 second
//! timeout, upstream JSON returned verbatim on success and surfaced verbatim
//! on failure.

use serde_json::Value;

use crate::utils::errors::AppError;

const TOMTOM_ROUTING_BASE: &str = "https://api.tomtom.com/routing/1/calculateRoute";

/// Parse an `origin`/`dest` query value of the form `lat,lon`.
pub fn parse_latlon_param(name: &str, raw: &str) -> Result<(f64, f64), AppError> {
    let mut parts = raw.split(',');
    let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(AppError::Validation(format!(
            "{} must be 'lat,lon'",
            name
        )));
    };

    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("{} must be 'lat,lon'", name)))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("{} must be 'lat,lon'", name)))?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(AppError::Validation(format!("{} out of range", name)));
    }

    Ok((lat, lon))
}

pub fn build_route_url(origin: (f64, f64), dest: (f64, f64), api_key: &str) -> String {
    format!(
        "{}/{},{}:{},{}/json?key={}",
        TOMTOM_ROUTING_BASE,
        origin.0,
        origin.1,
        dest.0,
        dest.1,
        urlencoding::encode(api_key)
    )
}

pub struct RoutingService {
    api_key: String,
    client: reqwest::Client,
}

impl RoutingService {
    pub fn new(api_key: String) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { api_key, client })
    }

    pub async fn calculate_route(
        &self,
        origin: (f64, f64),
        dest: (f64, f64),
    ) -> Result<Value, AppError> {
        let url = build_route_url(origin, dest, &self.api_key);
        log::info!("🧭 Routing request {:?} -> {:?}", origin, dest);

        let response = self.client.get(&url).send().await.map_err(|e| {
            log::error!("❌ Routing request failed: {}", e);
            AppError::ExternalApi {
                status: None,
                body: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("❌ Routing provider returned {}: {}", status, body);
            return Err(AppError::ExternalApi {
                status: Some(status.as_u16()),
                body,
            });
        }

        response.json::<Value>().await.map_err(|e| AppError::ExternalApi {
            status: Some(status.as_u16()),
            body: format!("Invalid routing response: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latlon_param_parses() {
        assert_eq!(
            parse_latlon_param("origin", "53.35,-6.26").unwrap(),
            (53.35, -6.26)
        );
        assert_eq!(
            parse_latlon_param("dest", " 54.0 , -7.25 ").unwrap(),
            (54.0, -7.25)
        );
    }

    #[test]
    fn latlon_param_rejects_malformed_values() {
        assert!(parse_latlon_param("origin", "53.35").is_err());
        assert!(parse_latlon_param("origin", "53.35,-6.26,1.0").is_err());
        assert!(parse_latlon_param("origin", "north,south").is_err());
        assert!(parse_latlon_param("origin", "91.0,0.0").is_err());
    }

    #[test]
    fn route_url_interleaves_coordinates_and_encodes_key() {
        let url = build_route_url((53.35, -6.26), (54.0, -7.25), "k&y");
        assert_eq!(
            url,
            "https://api.tomtom.com/routing/1/calculateRoute/53.35,-6.26:54,-7.25/json?key=k%26y"
        );
    }
}
