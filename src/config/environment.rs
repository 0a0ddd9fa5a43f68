//! Environment configuration
//!
//! All runtime configuration comes from environment variables, loaded via
//! dotenvy at startup and passed explicitly into the code that needs it.

use std::env;

#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    /// API key for the external routing provider. Absent means the routing
    /// proxy answers 500 until the deployment is configured.
    pub tomtom_api_key: Option<String>,
    /// Overpass interpreter endpoint used for POI lookups.
    pub overpass_url: String,
    /// Shared secret for the legacy unauthenticated ingest path. Absent
    /// disables that path entirely.
    pub ingest_token: Option<String>,
}

impl EnvironmentConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            jwt_expiration: env::var("JWT_EXPIRATION")
                .unwrap_or_else(|_| "86400".to_string())
                .parse()
                .expect("JWT_EXPIRATION must be a valid number"),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_default(),
            tomtom_api_key: env::var("TOMTOM_API_KEY").ok(),
            overpass_url: env::var("OVERPASS_URL")
                .unwrap_or_else(|_| "https://overpass-api.de/api/interpreter".to_string()),
            ingest_token: env::var("INGEST_TOKEN").ok(),
        }
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
