use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::models::location::Location;
use crate::utils::errors::AppError;

/// Location row joined with the lorry name, as the API serializes it.
#[derive(Debug, FromRow)]
pub struct LocationWithLorry {
    pub id: i64,
    pub lorry_id: i64,
    pub lorry_name: String,
    pub lon: f64,
    pub lat: f64,
    pub current_county: String,
    pub timestamp: DateTime<Utc>,
}

pub struct LocationRepository {
    pool: PgPool,
}

impl LocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append one observation. The timestamp is assigned by the database so
    /// ordering is consistent across concurrent writers.
    pub async fn insert(
        &self,
        lorry_id: i64,
        lon: f64,
        lat: f64,
        current_county: &str,
    ) -> Result<Location, AppError> {
        let location = sqlx::query_as::<_, Location>(
            r#"
            INSERT INTO locations (lorry_id, lon, lat, current_county)
            VALUES ($1, $2, $3, $4)
            RETURNING id, lorry_id, lon, lat, current_county, timestamp
            "#,
        )
        .bind(lorry_id)
        .bind(lon)
        .bind(lat)
        .bind(current_county)
        .fetch_one(&self.pool)
        .await?;

        Ok(location)
    }

    pub async fn list_all(&self) -> Result<Vec<LocationWithLorry>, AppError> {
        let locations = sqlx::query_as::<_, LocationWithLorry>(
            r#"
            SELECT loc.id, loc.lorry_id, l.name AS lorry_name,
                   loc.lon, loc.lat, loc.current_county, loc.timestamp
            FROM locations loc
            JOIN lorries l ON l.id = loc.lorry_id
            ORDER BY loc.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }

    /// One row per lorry that has at least one location: the newest by
    /// timestamp, tie-broken on the highest id so repeated calls are stable.
    /// Lorries without locations are simply absent from the result.
    pub async fn latest_per_lorry(&self) -> Result<Vec<LocationWithLorry>, AppError> {
        let locations = sqlx::query_as::<_, LocationWithLorry>(
            r#"
            SELECT DISTINCT ON (loc.lorry_id)
                   loc.id, loc.lorry_id, l.name AS lorry_name,
                   loc.lon, loc.lat, loc.current_county, loc.timestamp
            FROM locations loc
            JOIN lorries l ON l.id = loc.lorry_id
            ORDER BY loc.lorry_id, loc.timestamp DESC, loc.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }
}
