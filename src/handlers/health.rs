use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    timestamp: String,
    database: &'static str,
    admin_auth_configured: bool,
}

// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let database = match state.conn() {
        Ok(conn) => match conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0)) {
            Ok(_) => "ok",
            Err(e) => {
                tracing::error!(error = %e, "health check query failed");
                "unreachable"
            }
        },
        Err(_) => "unreachable",
    };

    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339(),
        database,
        admin_auth_configured: !state.config.admin_token.is_empty(),
    })
}
