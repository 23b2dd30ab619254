//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use liveboard_common::{AppConfig, AppError, StorageBackend};
use liveboard_core::SnowflakeGenerator;
use liveboard_db::{
    create_pool, run_migrations, MemoryStore, PgEventRepository, PgInteractionRepository,
    PgUserRepository, PoolConfig,
};
use liveboard_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// # Errors
/// Returns `AppError::Config` if the middleware settings are unusable
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;
    let health = apply_middleware(health_routes());

    Ok(api.merge(health).with_state(state))
}

/// Initialize the storage backend and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let engine = config.engine.clone();
    let builder = ServiceContextBuilder::new()
        .engine(engine.clone())
        .admin_ids(config.identity.admin_ids.iter().cloned())
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id)));

    let builder = match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory store");
            builder.memory_store(Arc::new(MemoryStore::with_max_attempts(
                engine.tx_max_attempts,
            )))
        }
        StorageBackend::Postgres => {
            let db_config = config.database.as_ref().ok_or_else(|| {
                AppError::Config("DATABASE_URL is required for the postgres backend".to_string())
            })?;

            info!("Connecting to PostgreSQL...");
            let pool = create_pool(&PoolConfig::from(db_config))
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            run_migrations(&pool)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("PostgreSQL connection established");

            builder
                .event_repo(Arc::new(PgEventRepository::new(pool.clone())))
                .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
                .interaction_repo(Arc::new(
                    PgInteractionRepository::new(pool).with_max_attempts(engine.tx_max_attempts),
                ))
        }
    };

    let service_context = builder
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server until ctrl-c
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(config).await?;
    let sweeper = state.service_context().spawn_cache_sweeper();

    let app = create_app(state)?;
    let result = run_server(app, addr).await;

    sweeper.stop().await;
    info!("Status cache sweeper stopped");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use liveboard_core::Actor;
    use tower::ServiceExt;

    fn memory_config() -> AppConfig {
        AppConfig::from_lookup(|key| match key {
            "API_PORT" => Some("0".to_string()),
            "IDENTITY_SECRET" => Some("test-secret-test-secret-test-secret".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let state = create_app_state(memory_config()).await.unwrap();
        let app = create_app(state).unwrap();

        let response = app
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::get("/health/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let state = create_app_state(memory_config()).await.unwrap();
        let app = create_app(state).unwrap();

        let response = app
            .oneshot(Request::get("/api/v1/users/@me").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key("x-request-id"));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "MISSING_AUTHORIZATION");
    }

    #[tokio::test]
    async fn test_invalid_event_id_is_bad_request() {
        let state = create_app_state(memory_config()).await.unwrap();
        let token = state
            .identity()
            .issue(&Actor::new("U1", "Alice", None), chrono::Duration::hours(1))
            .unwrap();
        let app = create_app(state).unwrap();

        let response = app
            .oneshot(
                Request::get("/api/v1/events/not-an-id/status")
                    .header("authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
