use axum::Router;
use axum_helpers::server::{create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_tasks::{PgTaskRepository, TaskService};
use std::time::Duration;
use tracing::info;

mod config;
mod health;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    init_tracing(&config.environment);

    // Connect to PostgreSQL, retrying transient startup failures
    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    database::postgres::run_migrations::<migration::Migrator>(&db, "todo-api")
        .await
        .map_err(|e| eyre::eyre!("Migration failed: {}", e))?;

    let repository = PgTaskRepository::new(db.clone());
    let service = TaskService::new(repository);

    // Domain routers apply their own state; the helpers add docs, tracing,
    // security headers, and the fallback handler.
    let api_routes = Router::new().nest("/tasks", domain_tasks::handlers::router(service));
    let router = create_router::<openapi::ApiDoc>(api_routes).await?;

    let app = router.merge(health::ready_router(db.clone()));

    info!("Starting todo-api with graceful shutdown (30s timeout)");

    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        info!("Shutting down: closing database connection");
        match db.close().await {
            Ok(_) => info!("PostgreSQL connection closed successfully"),
            Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("todo-api shutdown complete");
    Ok(())
}
