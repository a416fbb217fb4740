use axum::extract::Extension;
use serde_json::Value;

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /organizations - Every organization the key can see, as returned by the Dashboard
pub async fn list(Extension(state): Extension<AppState>) -> ApiResult<Vec<Value>> {
    let service = state.network_service()?;
    let organizations = service.organizations().await?;
    Ok(ApiResponse::success(organizations))
}
