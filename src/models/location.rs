use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// One immutable GPS observation for a lorry. Coordinates are stored in the
/// internal (lon, lat) order; `timestamp` is server-assigned on insert.
#[derive(Debug, Clone, FromRow)]
pub struct Location {
    pub id: i64,
    pub lorry_id: i64,
    pub lon: f64,
    pub lat: f64,
    pub current_county: String,
    pub timestamp: DateTime<Utc>,
}
