use axum::Json;
use serde_json::{json, Map, Value};

use crate::auth;
use crate::error::ApiError;

/// POST /authentication - sign the posted claims into a bearer token.
///
/// The body is signed as-is (plus expiry and issued-at); in practice clients
/// post `{"email": ...}` but nothing here insists on that.
pub async fn issue_token(Json(payload): Json<Map<String, Value>>) -> Result<Json<Value>, ApiError> {
    let token = auth::issue_token(payload).map_err(|e| {
        tracing::error!("token issue failed: {}", e);
        ApiError::Internal("unable to issue token".to_string())
    })?;

    Ok(Json(json!({ "token": token })))
}
