use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use sea_orm::DatabaseConnection;
use serde_json::json;

/// Router for the readiness endpoint, with the database handle applied.
pub fn ready_router(db: DatabaseConnection) -> Router {
    Router::new()
        .route("/ready", get(ready_handler))
        .with_state(db)
}

/// Readiness probe: verifies database connectivity.
async fn ready_handler(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match database::postgres::check_health(&db).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({"ready": true, "database": "connected"})),
        ),
        Err(e) => {
            tracing::error!("Readiness check failed: {:?}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"ready": false, "database": "disconnected"})),
            )
        }
    }
}
