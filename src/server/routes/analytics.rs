use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};

use crate::server::state::AppState;

/// Shown to dashboard users when the sample could not be fetched
pub const UNAVAILABLE_MESSAGE: &str = "Live data temporarily unavailable";

/// GET /api/analytics
///
/// Always 200. An unavailable provider yields `success: false` with the
/// zeroed snapshot so the dashboard can still render its charts.
pub async fn get_analytics(State(state): State<Arc<AppState>>) -> Json<Value> {
    let report = state.engine.aggregator().build_report().await;

    if report.status.is_available() {
        Json(json!({
            "success": true,
            "data": report.snapshot,
        }))
    } else {
        Json(json!({
            "success": false,
            "error": UNAVAILABLE_MESSAGE,
            "data": report.snapshot,
        }))
    }
}
