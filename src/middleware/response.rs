use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::types::Aggregation;

/// Number of networks / product types dropped from an aggregated response.
pub const PARTIAL_FAILURES_HEADER: HeaderName = HeaderName::from_static("x-partial-failures");

/// Wrapper for API responses; the body is the bare JSON payload
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub partial_failures: Option<usize>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 with `data` as the body
    pub fn success(data: T) -> Self {
        Self {
            data,
            partial_failures: None,
        }
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// Respond with the items of a best-effort aggregation.
    ///
    /// Dropped scopes stay out of the body; only their count is reported, in
    /// the `x-partial-failures` header.
    pub fn aggregated(result: Aggregation<T>) -> Self {
        Self {
            partial_failures: Some(result.failures.len()),
            data: result.items,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let body = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": true,
                        "message": "Failed to serialize response data",
                        "detail": "Failed to serialize response data",
                        "code": "INTERNAL_SERVER_ERROR"
                    })),
                )
                    .into_response();
            }
        };

        let mut response = (StatusCode::OK, Json(body)).into_response();
        if let Some(count) = self.partial_failures {
            response
                .headers_mut()
                .insert(PARTIAL_FAILURES_HEADER, HeaderValue::from(count));
        }
        response
    }
}

// Convenience type alias
pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
