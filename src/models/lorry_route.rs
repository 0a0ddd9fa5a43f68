use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::utils::geometry::LonLat;

/// One immutable planned route for a lorry: an ordered path of internal
/// (lon, lat) pairs plus a destination point. History accumulates append-only;
/// the latest route is the one with the greatest `created_at`.
#[derive(Debug, Clone, FromRow)]
pub struct LorryRoute {
    pub id: i64,
    pub lorry_id: i64,
    pub path: Json<Vec<LonLat>>,
    pub destination: Json<LonLat>,
    pub travel_time_seconds: Option<i32>,
    pub distance_meters: Option<i32>,
    pub created_at: DateTime<Utc>,
}
