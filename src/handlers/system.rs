use axum::{
    extract::Extension,
    http::Uri,
    response::Json,
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;

/// GET / - Service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Meraki Dashboard proxy",
        "version": version,
        "endpoints": {
            "set_api_key": "POST /set_api_key",
            "organizations": "GET /organizations",
            "networks": "GET /networks/:org_id",
            "details": "POST /networks/details",
            "events": "GET /networks/:network_id/events",
            "health": "GET /health"
        }
    }))
}

/// GET /health - Liveness plus whether a key has been installed
pub async fn health(Extension(state): Extension<AppState>) -> Json<Value> {
    let credential = state.credentials.status();

    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "credential_set": credential.is_some(),
        "credential_set_at": credential.map(|c| c.set_at),
    }))
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}
