use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

pub const DEFAULT_VENDOR_BASE_URL: &str = "https://api.meraki.com/api/v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub vendor: VendorConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Page size requested from paginated vendor endpoints
    pub per_page: u32,
    /// Page size requested from the events endpoint
    pub events_per_page: u32,
    /// Maximum number of event pages fetched per product type
    pub event_pages: u32,
}

impl VendorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
    pub log_headers: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    /// `*` allows any origin
    pub cors_origins: Vec<String>,
}

impl SecurityConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Some(port) = env::var("SERVER_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|v| v.parse().ok())
        {
            self.server.port = port;
        }

        // Vendor overrides
        if let Ok(v) = env::var("VENDOR_BASE_URL") {
            self.vendor.base_url = v.trim_end_matches('/').to_string();
        }
        if let Ok(v) = env::var("VENDOR_TIMEOUT_SECS") {
            self.vendor.timeout_secs = v.parse().unwrap_or(self.vendor.timeout_secs);
        }
        if let Ok(v) = env::var("VENDOR_PER_PAGE") {
            self.vendor.per_page = v.parse().unwrap_or(self.vendor.per_page);
        }
        if let Ok(v) = env::var("VENDOR_EVENTS_PER_PAGE") {
            self.vendor.events_per_page = v.parse().unwrap_or(self.vendor.events_per_page);
        }
        if let Ok(v) = env::var("VENDOR_EVENT_PAGES") {
            self.vendor.event_pages = v.parse().unwrap_or(self.vendor.event_pages);
        }

        // API overrides
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("API_LOG_HEADERS") {
            self.api.log_headers = v.parse().unwrap_or(self.api.log_headers);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            vendor: VendorConfig {
                base_url: DEFAULT_VENDOR_BASE_URL.to_string(),
                timeout_secs: 60,
                per_page: 1000,
                events_per_page: 10,
                event_pages: 3,
            },
            api: ApiConfig {
                enable_request_logging: true,
                log_headers: true,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["*".to_string()],
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            vendor: VendorConfig {
                base_url: DEFAULT_VENDOR_BASE_URL.to_string(),
                timeout_secs: 30,
                per_page: 1000,
                events_per_page: 10,
                event_pages: 3,
            },
            api: ApiConfig {
                enable_request_logging: true,
                log_headers: true,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["*".to_string()],
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            vendor: VendorConfig {
                base_url: DEFAULT_VENDOR_BASE_URL.to_string(),
                timeout_secs: 30,
                per_page: 1000,
                events_per_page: 10,
                event_pages: 3,
            },
            api: ApiConfig {
                enable_request_logging: true,
                log_headers: false,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["*".to_string()],
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_production {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Production)
    };
}
