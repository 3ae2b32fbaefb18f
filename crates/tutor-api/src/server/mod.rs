//! Server setup and initialization
//!
//! Provides the main application builder and server runner. The HTTP API
//! and the room WebSocket gateway run in one process behind one listener;
//! the WebSocket route is mounted outside the HTTP protection pipeline.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;
use tutor_common::{AppConfig, AppError};
use tutor_core::SnowflakeGenerator;
use tutor_db::{
    create_pool, run_migrations, PgCommentRepository, PgMessageRepository, PgNotificationQueue,
    PgParticipantRepository, PgRoomRepository, PgRosterRepository, PgTokenValidator,
};
use tutor_gateway::{gateway_router, ConnectionManager, GatewayState, RoomFanout};
use tutor_service::ServiceContextBuilder;

use crate::middleware::{apply_outer_pipeline, apply_protection};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState, gateway_state: GatewayState) -> Router {
    let config = state.config().clone();

    // Protected API routes; health bypasses the protection stack
    let api = apply_protection(create_router(), &state);
    let router = api
        .merge(health_routes())
        .layer(DefaultBodyLimit::max(config.validation.max_body_bytes))
        .with_state(state);

    // WebSocket gateway carries its own state and rejects via close codes
    let router = router.merge(gateway_router(gateway_state));

    apply_outer_pipeline(router, &config.cors, config.app.env.is_production())
}

/// Initialize all dependencies and create the application states
pub async fn create_app_state(config: AppConfig) -> Result<(AppState, GatewayState), AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = tutor_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("Migrations applied");

    // Create Snowflake generator
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    // Create repositories and collaborators
    let room_repo = Arc::new(PgRoomRepository::new(pool.clone()));
    let participant_repo = Arc::new(PgParticipantRepository::new(pool.clone()));
    let message_repo = Arc::new(PgMessageRepository::new(pool.clone()));
    let comment_repo = Arc::new(PgCommentRepository::new(pool.clone()));
    let roster_repo = Arc::new(PgRosterRepository::new(pool.clone()));
    let token_validator = Arc::new(PgTokenValidator::new(pool.clone()));
    let notification_queue = Arc::new(PgNotificationQueue::new(pool));

    // Live delivery fan-out over the in-process connection registry
    let connection_manager = Arc::new(ConnectionManager::new());
    let event_sink = Arc::new(RoomFanout::new(
        connection_manager.clone(),
        notification_queue,
    ));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .room_repo(room_repo)
        .participant_repo(participant_repo)
        .message_repo(message_repo)
        .comment_repo(comment_repo)
        .roster_repo(roster_repo)
        .token_validator(token_validator)
        .event_sink(event_sink)
        .snowflake_generator(snowflake_generator)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    let gateway_state = GatewayState::new(Arc::new(service_context.clone()), connection_manager);
    let app_state = AppState::new(service_context, config);

    Ok((app_state, gateway_state))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.server.address();

    let (state, gateway_state) = create_app_state(config).await?;
    let app = create_app(state, gateway_state);

    run_server(app, &addr).await
}
