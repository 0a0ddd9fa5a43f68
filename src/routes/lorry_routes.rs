use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Extension, Json, Router,
};

use crate::controllers::lorry_controller::LorryController;
use crate::dto::lorry_dto::{CreateLorryRequest, LorryResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_lorry_router() -> Router<AppState> {
    Router::new()
        .route("/lorries", get(list_lorries))
        .route("/lorries", post(create_lorry))
        .route("/lorries/:id", get(get_lorry))
        .route("/lorries/:id", delete(delete_lorry))
}

async fn list_lorries(
    State(state): State<AppState>,
) -> Result<Json<Vec<LorryResponse>>, AppError> {
    let controller = LorryController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn get_lorry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<LorryResponse>, AppError> {
    let controller = LorryController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn create_lorry(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateLorryRequest>,
) -> Result<(StatusCode, Json<LorryResponse>), AppError> {
    let controller = LorryController::new(state.pool.clone());
    let response = controller.create(&user, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn delete_lorry(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let controller = LorryController::new(state.pool.clone());
    controller.delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
