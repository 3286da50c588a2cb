//! CORS policy module
//!
//! Two policies are supported: permissive (`*`, the default when no origins
//! are listed) and an explicit origin allow-list, in which case the request
//! `Origin` is echoed back only when listed.

use crate::config::HttpConfig;

/// CORS policy resolved from configuration
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    enabled: bool,
    allowed_origins: Vec<String>,
}

impl CorsPolicy {
    pub fn from_config(http: &HttpConfig) -> Self {
        Self {
            enabled: http.enable_cors,
            allowed_origins: http.cors_allowed_origins.clone(),
        }
    }

    /// Value for `Access-Control-Allow-Origin`, if any should be sent.
    ///
    /// - Disabled policy: no header
    /// - Empty allow-list: `*`
    /// - Otherwise: echo the request origin only when it is listed
    pub fn allow_origin(&self, request_origin: Option<&str>) -> Option<String> {
        if !self.enabled {
            return None;
        }
        if self.allowed_origins.is_empty() {
            return Some("*".to_string());
        }
        request_origin
            .filter(|origin| self.allowed_origins.iter().any(|o| o == origin))
            .map(ToString::to_string)
    }
}
