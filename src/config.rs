use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub login_path: String,
    pub main_path: String,
    /// Endpoints starting with this prefix get the bearer token.
    pub admin_route_prefix: String,
    pub enable_logging: bool,
    pub timing: TimingConfig,
    pub paging: PagingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:7070/api".to_string(),
            login_path: "/login".to_string(),
            main_path: "/".to_string(),
            admin_route_prefix: "admin/".to_string(),
            enable_logging: true,
            timing: TimingConfig::default(),
            paging: PagingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    pub notification_timeout_ms: u32,
    pub login_notification_timeout_ms: u32,
    pub search_debounce_ms: u32,
    pub unauthorized_redirect_delay_ms: u32,
    pub login_redirect_delay_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            notification_timeout_ms: 3000,
            login_notification_timeout_ms: 5000,
            search_debounce_ms: 400,
            unauthorized_redirect_delay_ms: 2000,
            login_redirect_delay_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagingConfig {
    /// Devices fetched per building card.
    pub device_page_size: u32,
    /// Devices fetched for the bulk ignore dialog ("all").
    pub modal_device_limit: u32,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            device_page_size: 100,
            modal_device_limit: 10000,
        }
    }
}

impl AppConfig {
    /// Load configuration from compile-time environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: option_env!("API_BASE_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            login_path: option_env!("LOGIN_PATH")
                .map(str::to_string)
                .unwrap_or(defaults.login_path),
            main_path: option_env!("MAIN_PATH")
                .map(str::to_string)
                .unwrap_or(defaults.main_path),
            admin_route_prefix: defaults.admin_route_prefix,
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            timing: TimingConfig {
                notification_timeout_ms: option_env!("NOTIFICATION_TIMEOUT_MS")
                    .unwrap_or("3000").parse().unwrap_or(3000),
                login_notification_timeout_ms: defaults.timing.login_notification_timeout_ms,
                search_debounce_ms: option_env!("SEARCH_DEBOUNCE_MS")
                    .unwrap_or("400").parse().unwrap_or(400),
                unauthorized_redirect_delay_ms: option_env!("UNAUTHORIZED_REDIRECT_DELAY_MS")
                    .unwrap_or("2000").parse().unwrap_or(2000),
                login_redirect_delay_ms: defaults.timing.login_redirect_delay_ms,
            },
            paging: PagingConfig {
                device_page_size: option_env!("DEVICE_PAGE_SIZE")
                    .unwrap_or("100").parse().unwrap_or(100),
                modal_device_limit: option_env!("MODAL_DEVICE_LIMIT")
                    .unwrap_or("10000").parse().unwrap_or(10000),
            },
        }
    }

    /// Join the base URL with a relative endpoint
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    pub fn is_admin_route(&self, endpoint: &str) -> bool {
        endpoint
            .trim_start_matches('/')
            .starts_with(&self.admin_route_prefix)
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Global static configuration
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
