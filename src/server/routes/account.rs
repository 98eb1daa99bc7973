use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Json;
use serde_json::{json, Value};
use tracing::warn;

use crate::errors::RpcError;
use crate::server::error::ApiError;
use crate::server::state::AppState;

/// GET /api/account/{address}
///
/// Returns the balance and ownership of one account. A malformed address is
/// a 400; a provider failure is a 200 with `success: false`.
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> Result<Json<Value>, ApiError> {
    match state.engine.accounts().inspect(&address).await {
        Ok(summary) => Ok(Json(json!({
            "success": true,
            "data": summary,
        }))),
        Err(e @ RpcError::InvalidAddress { .. }) => Err(ApiError::bad_request(e.to_string())),
        Err(e) => {
            warn!("Account lookup for {} failed: {}", address, e);
            Ok(Json(json!({
                "success": false,
                "error": "Account lookup failed",
            })))
        }
    }
}
