//! Route store
//!
//! Saving a route appends a new immutable row; "the" route for a lorry is the
//! newest one. Clearing deletes the whole history for that lorry.

use sqlx::PgPool;
use validator::Validate;

use crate::controllers::access_control::AccessControl;
use crate::dto::route_dto::{RouteResponse, SaveRouteRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::repositories::lorry_repository::LorryRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::utils::errors::AppError;
use crate::utils::geometry::{path_from_latlon, point_from_latlon};

pub struct RouteController {
    lorries: LorryRepository,
    routes: RouteRepository,
    access: AccessControl,
}

impl RouteController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            lorries: LorryRepository::new(pool.clone()),
            routes: RouteRepository::new(pool.clone()),
            access: AccessControl::new(pool),
        }
    }

    pub async fn save(
        &self,
        caller: &AuthenticatedUser,
        request: SaveRouteRequest,
    ) -> Result<RouteResponse, AppError> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let lorry_id = request
            .lorry
            .ok_or_else(|| AppError::Validation("lorry is required".to_string()))?;

        // Geometry first: nothing touches storage until the whole request
        // is known to be well-formed.
        let path_value = request
            .path
            .ok_or_else(|| AppError::Validation("path is required".to_string()))?;
        let destination_value = request
            .destination
            .ok_or_else(|| AppError::Validation("destination is required".to_string()))?;

        let path = path_from_latlon(&path_value)?;
        let destination = point_from_latlon(&destination_value)?;

        let lorry = self
            .lorries
            .find_by_id(lorry_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Lorry {} not found", lorry_id)))?;

        self.access.authorize(caller, &lorry).await?;

        let route = self
            .routes
            .insert(
                lorry.id,
                path,
                destination,
                request.travel_time_seconds,
                request.distance_meters,
            )
            .await?;

        log::info!(
            "🗺️ Route {} saved for lorry {} ({} points)",
            route.id,
            lorry.id,
            route.path.0.len()
        );

        Ok(RouteResponse::from_model(&route, &lorry.name))
    }

    /// Latest route for the lorry, or `None` (a 204 at the HTTP layer, never
    /// an error).
    pub async fn latest(&self, lorry_id: i64) -> Result<Option<RouteResponse>, AppError> {
        let lorry = self
            .lorries
            .find_by_id(lorry_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Lorry {} not found", lorry_id)))?;

        let route = self.routes.latest_for_lorry(lorry.id).await?;

        Ok(route.map(|r| RouteResponse::from_model(&r, &lorry.name)))
    }

    /// Internal path of the latest route, for the POI aggregator. A missing
    /// lorry and a lorry without routes both read as "nothing to sample".
    pub async fn latest_path(
        &self,
        lorry_id: i64,
    ) -> Result<Option<Vec<crate::utils::geometry::LonLat>>, AppError> {
        let route = self.routes.latest_for_lorry(lorry_id).await?;
        Ok(route.map(|r| r.path.0))
    }

    /// Delete every stored route for the lorry. Idempotent.
    pub async fn clear(
        &self,
        caller: &AuthenticatedUser,
        lorry_id: i64,
    ) -> Result<u64, AppError> {
        let lorry = self
            .lorries
            .find_by_id(lorry_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Lorry {} not found", lorry_id)))?;

        self.access.authorize(caller, &lorry).await?;

        let deleted = self.routes.delete_all_for_lorry(lorry.id).await?;
        log::info!("🧹 Cleared {} route(s) for lorry {}", deleted, lorry.id);

        Ok(deleted)
    }
}
