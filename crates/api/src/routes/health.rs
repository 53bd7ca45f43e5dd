//! `/health`: liveness plus a database round trip.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize, PartialEq)]
pub struct HealthReport {
    /// `ok` when the database answered, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

impl HealthReport {
    /// Turn the outcome of the database probe into a report and the status
    /// code it is served with.
    pub fn from_probe(probe: Result<(), sqlx::Error>) -> (StatusCode, Self) {
        let db_healthy = match probe {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Health probe could not reach the database");
                false
            }
        };
        let (code, status) = if db_healthy {
            (StatusCode::OK, "ok")
        } else {
            (StatusCode::SERVICE_UNAVAILABLE, "degraded")
        };
        (
            code,
            HealthReport {
                status,
                version: env!("CARGO_PKG_VERSION"),
                db_healthy,
            },
        )
    }
}

async fn report(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let (code, report) = HealthReport::from_probe(worklog_db::health_check(&state.pool).await);
    (code, Json(report))
}

/// Mounted at the root, outside `/api`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(report))
}
