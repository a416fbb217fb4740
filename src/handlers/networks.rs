use axum::extract::{Extension, Path};
use serde::Deserialize;
use serde_json::Value;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, ValidJson};
use crate::types::{ClientRecord, EventRecord};

#[derive(Debug, Deserialize)]
pub struct DetailsRequest {
    #[serde(default)]
    pub network_ids: Vec<String>,
}

/// GET /networks/:org_id - All networks of an organization, every page
pub async fn list(
    Path(org_id): Path<String>,
    Extension(state): Extension<AppState>,
) -> ApiResult<Vec<Value>> {
    let service = state.network_service()?;
    let networks = service.networks(&org_id).await?;
    Ok(ApiResponse::success(networks))
}

/// POST /networks/details - Clients of each network joined to their last access point
///
/// Networks whose clients or devices cannot be fetched are left out; the
/// `x-partial-failures` header counts them. The credential is checked
/// before the body, so an unset key wins over a malformed payload.
pub async fn details(
    Extension(state): Extension<AppState>,
    payload: Result<ValidJson<DetailsRequest>, ApiError>,
) -> ApiResult<Vec<ClientRecord>> {
    let service = state.network_service()?;
    let ValidJson(payload) = payload?;
    let result = service.client_details(&payload.network_ids).await;

    if result.is_partial() {
        tracing::warn!(
            "Network details incomplete: {} of {} networks skipped",
            result.failures.len(),
            payload.network_ids.len()
        );
    }
    Ok(ApiResponse::aggregated(result))
}

/// GET /networks/:network_id/events - Recent events across all product types
pub async fn events(
    Path(network_id): Path<String>,
    Extension(state): Extension<AppState>,
) -> ApiResult<Vec<EventRecord>> {
    let service = state.network_service()?;
    let result = service.events(&network_id).await;

    tracing::debug!(
        "Collected {} events for network {} ({} product types skipped)",
        result.items.len(),
        network_id,
        result.failures.len()
    );
    Ok(ApiResponse::aggregated(result))
}
