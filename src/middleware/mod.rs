pub mod extract;
pub mod request_log;
pub mod response;

pub use extract::ValidJson;
pub use request_log::log_requests;
pub use response::{ApiResponse, ApiResult, PARTIAL_FAILURES_HEADER};
