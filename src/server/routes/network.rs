use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;

use crate::server::state::AppState;
use crate::types::NetworkStatsReading;

/// GET /api/network-stats
///
/// Returns `{success, tps, slot, blockTime}` plus `stale: true` when the
/// figures are past their TTL and the refresh failed.
pub async fn get_network_stats(State(state): State<Arc<AppState>>) -> Json<NetworkStatsReading> {
    Json(state.engine.network_stats().get().await)
}
