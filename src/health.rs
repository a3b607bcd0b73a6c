//! The liveness check endpoint.

use axum::Json;
use serde::Serialize;

/// The body returned by [get_health].
#[derive(Debug, Serialize, PartialEq)]
pub struct HealthStatus {
    status: &'static str,
}

/// Report that the server is running.
pub async fn get_health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "healthy" })
}
