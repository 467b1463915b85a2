use axum::extract::State;
use axum::{routing::get, Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"OK"` or `"Database Error"`.
    pub status: &'static str,
    /// RFC 3339 time of the check, millisecond precision.
    pub timestamp: String,
    /// `"Connected"` or `"Disconnected"`.
    pub database: &'static str,
    /// Which tender store is serving requests.
    pub backend: &'static str,
}

/// GET /health -- pings the tender store.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = match state.store.ping().await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Health check could not reach the tender store");
            false
        }
    };

    Json(HealthResponse {
        status: if connected { "OK" } else { "Database Error" },
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        database: if connected { "Connected" } else { "Disconnected" },
        backend: state.store.backend(),
    })
}

/// Mount health check routes. Merged at the root and under `/api`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
