use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::lorry_route::LorryRoute;
use crate::utils::errors::AppError;
use crate::utils::geometry::LonLat;

pub struct RouteRepository {
    pool: PgPool,
}

impl RouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append one immutable route row. Existing routes for the lorry are
    /// never touched; the newest row wins by recency.
    pub async fn insert(
        &self,
        lorry_id: i64,
        path: Vec<LonLat>,
        destination: LonLat,
        travel_time_seconds: Option<i32>,
        distance_meters: Option<i32>,
    ) -> Result<LorryRoute, AppError> {
        let route = sqlx::query_as::<_, LorryRoute>(
            r#"
            INSERT INTO lorry_routes (lorry_id, path, destination, travel_time_seconds, distance_meters)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, lorry_id, path, destination, travel_time_seconds, distance_meters, created_at
            "#,
        )
        .bind(lorry_id)
        .bind(Json(path))
        .bind(Json(destination))
        .bind(travel_time_seconds)
        .bind(distance_meters)
        .fetch_one(&self.pool)
        .await?;

        Ok(route)
    }

    pub async fn latest_for_lorry(&self, lorry_id: i64) -> Result<Option<LorryRoute>, AppError> {
        let route = sqlx::query_as::<_, LorryRoute>(
            r#"
            SELECT id, lorry_id, path, destination, travel_time_seconds, distance_meters, created_at
            FROM lorry_routes
            WHERE lorry_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(lorry_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(route)
    }

    /// Delete every route for the lorry, not just the latest. Deleting zero
    /// rows is a successful no-op.
    pub async fn delete_all_for_lorry(&self, lorry_id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM lorry_routes WHERE lorry_id = $1")
            .bind(lorry_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
