//! Gateway server setup
//!
//! Wires the dependency graph together and runs the axum server.

mod handler;
mod state;

pub use handler::gateway_handler;
pub use state::GatewayState;

use axum::{routing::get, Router};
use livechat_cache::{RedisPool, RedisPoolConfig, RedisPresenceStore};
use livechat_common::{AppConfig, AppError, JwtService};
use livechat_push::FcmClient;
use livechat_service::ServiceContextBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Create the gateway router
pub fn create_router() -> Router<GatewayState> {
    Router::new()
        .route("/ws", get(gateway_handler))
        .route("/health", get(health_check))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Build the complete application
pub fn create_app(state: GatewayState) -> Router {
    create_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize all dependencies and create `GatewayState`
pub async fn create_gateway_state(config: &AppConfig) -> Result<GatewayState, AppError> {
    // Create database pool
    tracing::info!("Connecting to PostgreSQL...");
    let db_config = livechat_db::DatabaseConfig::from(&config.database);
    let pool = livechat_db::create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    livechat_db::run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    tracing::info!("PostgreSQL connection established");

    // Create Redis pool and presence store
    tracing::info!("Connecting to Redis...");
    let redis_config = RedisPoolConfig::from(&config.redis);
    let redis_pool = RedisPool::new(redis_config).map_err(|e| AppError::Cache(e.to_string()))?;
    let presence_store = Arc::new(RedisPresenceStore::new(redis_pool));
    tracing::info!("Redis connection established");

    // Create repositories
    let chat_repo = Arc::new(livechat_db::PgChatRepository::new(pool.clone()));
    let message_repo = Arc::new(livechat_db::PgMessageRepository::new(pool.clone()));
    let visitor_repo = Arc::new(livechat_db::PgVisitorRepository::new(pool.clone()));
    let device_repo = Arc::new(livechat_db::PgDeviceRepository::new(pool));

    // Build service context
    let mut builder = ServiceContextBuilder::new()
        .chat_repo(chat_repo)
        .message_repo(message_repo)
        .visitor_repo(visitor_repo)
        .device_repo(device_repo)
        .presence_store(presence_store);

    match FcmClient::from_config(&config.push) {
        Some(client) => builder = builder.push_provider(Arc::new(client)),
        None => tracing::info!("FCM server key not configured; push delivery disabled"),
    }

    let services = builder.build().map_err(|e| AppError::Config(e.to_string()))?;

    let jwt = JwtService::new(&config.jwt.secret, config.jwt.token_expiry);

    Ok(GatewayState::new(services, jwt))
}

/// Run the gateway server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!("Gateway listening on ws://{}/ws", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete gateway server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.gateway.port));

    let state = create_gateway_state(&config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
