use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub app: AppConfig,
}

/// Settings for the outbound API adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin of the letsmeet service (scheme + host + port).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// Total request timeout in seconds (default: 30). Zero means unbounded.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u32,
    /// Maximum number of redirects followed per request (default: 10).
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

/// Settings for the application shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Name of the page element the application attaches to.
    #[serde(default = "default_mount_point")]
    pub mount_point: String,
    /// Route activated when a path matches nothing in the table.
    #[serde(default = "default_fallback_route")]
    pub fallback_route: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_request_timeout() -> u32 {
    30
}

fn default_max_redirects() -> usize {
    10
}

fn default_mount_point() -> String {
    "mount-point".to_string()
}

fn default_fallback_route() -> String {
    "map".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_seconds: default_connect_timeout(),
            request_timeout_seconds: default_request_timeout(),
            max_redirects: default_max_redirects(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mount_point: default_mount_point(),
            fallback_route: default_fallback_route(),
        }
    }
}
