// handlers/credentials.rs - POST /set_api_key handler

use axum::extract::Extension;
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult, ValidJson};

#[derive(Debug, Deserialize)]
pub struct SetApiKeyRequest {
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SetApiKeyResponse {
    pub message: String,
}

/**
 * POST /set_api_key - Install the Dashboard API key used by every other endpoint
 *
 * Expected Input:
 * ```json
 * { "api_key": "string" }
 * ```
 *
 * Replaces any key set earlier. A missing or blank key is a 400 and leaves
 * the previous key in place.
 */
pub async fn set_api_key(
    Extension(state): Extension<AppState>,
    ValidJson(payload): ValidJson<SetApiKeyRequest>,
) -> ApiResult<SetApiKeyResponse> {
    let status = state.credentials.set(payload.api_key.as_deref())?;
    tracing::info!("API Key set successfully (fingerprint {})", status.fingerprint);

    Ok(ApiResponse::success(SetApiKeyResponse {
        message: "API Key set successfully".to_string(),
    }))
}
