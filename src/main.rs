mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{middleware as axum_middleware, response::Json, routing::get, Router};
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use dotenvy::dotenv;
use serde_json::json;

use config::environment::EnvironmentConfig;
use middleware::auth::auth_middleware;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use middleware::ingest_token::ingest_auth_middleware;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚚 Lorry Tracking API");
    info!("=====================");

    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error connecting to the database: {}", e);
            return Err(anyhow::anyhow!("Database error: {}", e));
        }
    };

    let config = EnvironmentConfig::from_env();
    let addr: SocketAddr = config.server_url().parse()?;

    // No configured origins means a permissive development setup.
    let cors = if config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    let app_state = AppState::new(pool, config);

    // Everything except login and ingest sits behind JWT auth; ingest has its
    // own middleware that also honors the legacy shared token.
    let protected = Router::new()
        .merge(routes::lorry_routes::create_lorry_router())
        .merge(routes::location_routes::create_location_router())
        .merge(routes::route_routes::create_route_router())
        .merge(routes::routing_proxy_routes::create_routing_proxy_router())
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let ingest = routes::location_routes::create_ingest_router().route_layer(
        axum_middleware::from_fn_with_state(app_state.clone(), ingest_auth_middleware),
    );

    let app = Router::new()
        .route("/health", get(health))
        .nest(
            "/api",
            Router::new()
                .merge(routes::auth_routes::create_auth_router())
                .merge(protected)
                .merge(ingest),
        )
        .layer(cors)
        .with_state(app_state);

    info!("🌐 Server starting on http://{}", addr);
    info!("🔍 Endpoints:");
    info!("   POST /api/auth/login - Obtain a token");
    info!("   GET  /api/lorries - List lorries");
    info!("   GET  /api/locations - List locations");
    info!("   GET  /api/latest-locations - Latest location per lorry");
    info!("   POST /api/ingest-location - Append a GPS ping");
    info!("   POST /api/routes - Save a route");
    info!("   GET  /api/lorry/:id/route - Latest route");
    info!("   DELETE /api/lorry/:id/route/clear - Clear route history");
    info!("   GET  /api/lorry/:id/pois - POIs along the latest route");
    info!("   GET  /api/route - Routing provider proxy");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Server error: {}", e);
            e
        })?;

    info!("👋 Server stopped");
    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "service": "lorry-tracking",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Ctrl+C received, shutting down...");
        },
        _ = terminate => {
            info!("🛑 Termination signal received, shutting down...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_endpoint_responds() {
        let app = Router::new().route("/health", get(health));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
