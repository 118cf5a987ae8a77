mod config;
mod db;
mod error;
mod forms;
mod handlers;
mod models;
mod occupancy;
mod password;
mod window;

use anyhow::{Context, Result};
use axum::{
    Router,
    routing::{get, post, put},
};
use config::Config;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub struct AppState {
    pub db_pool: PgPool,
    pub config: Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roombook=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenv::dotenv().ok();
    let config = Config::from_env()?;

    // Set up database
    tracing::info!("Connecting to database");
    let db_pool = db::create_pool(&config.database_url).await
        .context("Failed to create database pool")?;

    tracing::info!("Running database migrations");
    db::run_migrations(&db_pool).await
        .context("Failed to run migrations")?;

    let addr = config.bind_addr();
    let state = Arc::new(AppState { db_pool, config });

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/rooms", get(handlers::handle_list_rooms).post(handlers::handle_create_room))
        .route("/rooms/:id", get(handlers::handle_get_room).put(handlers::handle_update_room))
        .route("/rooms/:id/toggle", post(handlers::handle_toggle_room))
        .route("/rooms/:id/applications", get(handlers::handle_room_applications))
        .route("/rooms/:id/occupancy", get(handlers::handle_occupancy))
        .route("/room-types", get(handlers::handle_room_types))
        .route("/campuses", get(handlers::handle_campuses))
        .route("/room-statuses", get(handlers::handle_room_statuses))
        .route("/admins", post(handlers::handle_signup))
        .route("/admins/:id/password", put(handlers::handle_reset_password))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
