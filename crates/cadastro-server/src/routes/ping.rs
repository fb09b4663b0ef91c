//! Liveness check endpoint.

use axum::Json;
use serde::Serialize;
use tracing::info;

#[derive(Serialize)]
pub struct PingStatus {
    pub status: &'static str,
}

/// Liveness check: emits a log line and reports a fixed OK payload
pub async fn ping() -> Json<PingStatus> {
    info!("Liveness ping received");
    Json(PingStatus { status: "OK" })
}
