use actix_web::{get, web, HttpResponse};
use chrono::Utc;
use diesel::prelude::*;
use log::{error, info};
use tokio::time::{timeout, Duration};

use crate::config::db::Pool as DatabasePool;
use crate::constants;
use crate::error::ServiceError;
use crate::metrics;
use crate::models::response::ResponseBody;

#[derive(Serialize, Clone)]
enum Status {
    #[serde(rename = "healthy")]
    Healthy,
    #[serde(rename = "unhealthy")]
    Unhealthy,
}

impl Status {
    fn is_healthy(&self) -> bool {
        matches!(self, Status::Healthy)
    }
}

#[derive(Serialize)]
struct HealthStatus {
    database: Status,
}

#[derive(Serialize)]
struct HealthResponse {
    status: Status,
    timestamp: String,
    components: HealthStatus,
}

async fn check_database_health_async(
    pool: web::Data<DatabasePool>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    tokio::task::spawn_blocking(move || check_database_health(pool)).await?
}

/// Checks database connectivity by acquiring a connection from the pool and
/// executing `SELECT 1`.
fn check_database_health(
    pool: web::Data<DatabasePool>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    match pool.get() {
        Ok(mut conn) => {
            diesel::sql_query("SELECT 1").execute(&mut conn)?;
            Ok(())
        }
        Err(e) => Err(Box::new(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Failed to get database connection: {}", e),
        ))),
    }
}

/// Return a JSON health summary for the service: overall `Status`, an
/// RFC3339 `timestamp`, and the `database` component status.
#[get("/health")]
pub async fn health(pool: web::Data<DatabasePool>) -> Result<HttpResponse, ServiceError> {
    info!("Health check requested");

    let db_status = match timeout(Duration::from_secs(5), check_database_health_async(pool)).await
    {
        Ok(Ok(())) => Status::Healthy,
        Ok(Err(e)) => {
            error!("Database health check failed: {}", e);
            Status::Unhealthy
        }
        Err(_) => {
            error!("Database health check timeout");
            Status::Unhealthy
        }
    };

    let overall_status = if db_status.is_healthy() {
        Status::Healthy
    } else {
        Status::Unhealthy
    };

    let response = HealthResponse {
        status: overall_status,
        timestamp: Utc::now().to_rfc3339(),
        components: HealthStatus {
            database: db_status,
        },
    };

    Ok(HttpResponse::Ok().json(ResponseBody::new(constants::MESSAGE_OK, response)))
}

/// Expose the operation counter snapshot, keyed by
/// `customer_data.<operation>.<outcome>`.
#[get("/metrics")]
pub async fn operation_metrics() -> Result<HttpResponse, ServiceError> {
    Ok(HttpResponse::Ok().json(ResponseBody::new(constants::MESSAGE_OK, metrics::snapshot())))
}
