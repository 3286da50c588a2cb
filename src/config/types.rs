// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    pub show_headers: bool,
    /// Access log format (combined, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub enable_cors: bool,
    /// Origins allowed by CORS; empty means any origin (`*`)
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
    pub max_body_size: u64,
}

/// Latency-simulation strategy selector
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SimulationMode {
    /// Respond immediately
    None,
    /// Non-blocking fixed delay per request
    IdleDelay,
    /// CPU-bound phases with interleaved pauses
    SyntheticLoad,
}

/// Latency simulation configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SimulationConfig {
    pub mode: SimulationMode,
    /// Per-request delay for `idle_delay` mode, in milliseconds
    pub delay_ms: u64,
    /// Pause between synthetic work units, in milliseconds
    pub phase_pause_ms: u64,
    /// Busy-loop iterations for the "search" phase
    pub search_iterations: u32,
    /// Busy-loop iterations for the "analysis" phase
    pub analysis_iterations: u32,
    /// Busy-loop iterations for the "report" phase
    pub report_iterations: u32,
}

/// Report payload configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ReportConfig {
    /// Optional markdown file overriding the built-in report body
    #[serde(default)]
    pub file: Option<String>,
}
