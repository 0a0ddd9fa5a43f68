//! Overpass API client
//!
//! Thin transport layer for the map-data provider: one POST per aggregation
//! call, 30 second timeout, no retries. Failures carry the upstream status
//! and body back to the caller.

use crate::dto::poi_dto::OverpassResponse;
use crate::utils::errors::AppError;

pub struct OverpassService {
    url: String,
    client: reqwest::Client,
}

impl OverpassService {
    pub fn new(url: String) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { url, client })
    }

    pub async fn query(&self, query: &str) -> Result<OverpassResponse, AppError> {
        log::info!("🌐 Overpass query ({} bytes) to {}", query.len(), self.url);

        let response = self
            .client
            .post(&self.url)
            .form(&[("data", query)])
            .send()
            .await
            .map_err(|e| {
                log::error!("❌ Overpass request failed: {}", e);
                AppError::ExternalApi {
                    status: None,
                    body: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("❌ Overpass returned {}: {}", status, body);
            return Err(AppError::ExternalApi {
                status: Some(status.as_u16()),
                body,
            });
        }

        response.json::<OverpassResponse>().await.map_err(|e| {
            log::error!("❌ Overpass response was not valid JSON: {}", e);
            AppError::ExternalApi {
                status: Some(status.as_u16()),
                body: format!("Invalid Overpass response: {}", e),
            }
        })
    }
}
