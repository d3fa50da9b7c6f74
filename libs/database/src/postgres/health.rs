use sea_orm::DatabaseConnection;

use crate::common::{DatabaseError, DatabaseResult};

/// Check PostgreSQL connectivity by pinging the connection pool.
///
/// Used by readiness probes; a failure means the service should not
/// receive traffic yet.
pub async fn check_health(db: &DatabaseConnection) -> DatabaseResult<()> {
    db.ping()
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))
}
