use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, post},
    Extension, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::CredentialHolder;
use crate::config::{AppConfig, SecurityConfig};
use crate::error::ApiError;
use crate::handlers;
use crate::middleware::log_requests;
use crate::services::NetworkService;
use crate::vendor::{DashboardConnector, VendorConnector};

/// Per-process context injected into every handler
#[derive(Clone, Debug)]
pub struct AppState {
    pub credentials: CredentialHolder,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig, connector: Arc<dyn VendorConnector>) -> Self {
        Self {
            credentials: CredentialHolder::new(connector),
            config: Arc::new(config),
        }
    }

    /// State talking to the real Dashboard API
    pub fn from_config(config: AppConfig) -> Self {
        let connector = Arc::new(DashboardConnector::new(config.vendor.clone()));
        Self::new(config, connector)
    }

    /// Service bound to the current credential; fails before any remote call when unset
    pub fn network_service(&self) -> Result<NetworkService, ApiError> {
        let api = self.credentials.current()?;
        Ok(NetworkService::new(api, self.config.vendor.event_pages))
    }
}

pub fn app(state: AppState) -> Router {
    let config = Arc::clone(&state.config);

    let mut router = Router::new()
        // Public
        .route("/", get(handlers::system::root))
        .route("/health", get(handlers::system::health))
        // Credential
        .route("/set_api_key", post(handlers::credentials::set_api_key))
        // Dashboard queries
        .merge(dashboard_routes())
        .fallback(handlers::system::not_found)
        .layer(Extension(state));

    if config.api.enable_request_logging {
        router = router.layer(from_fn_with_state(config.api.clone(), log_requests));
    }
    if let Some(cors) = cors_layer(&config.security) {
        router = router.layer(cors);
    }

    router.layer(TraceLayer::new_for_http())
}

fn dashboard_routes() -> Router {
    use handlers::{networks, organizations};

    // `/networks/details` is static and wins over `/networks/:id`
    Router::new()
        .route("/organizations", get(organizations::list))
        .route("/networks/details", post(networks::details))
        .route("/networks/:id", get(networks::list))
        .route("/networks/:id/events", get(networks::events))
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }
    if security.allows_any_origin() {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
            .expose_headers(Any),
    )
}
