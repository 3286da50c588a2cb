// Configuration module entry point
// Manages application configuration loading and runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HttpConfig, LoggingConfig, PerformanceConfig, ReportConfig, ServerConfig,
    SimulationConfig, SimulationMode,
};

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("STUBD").separator("__"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "stubd/0.1")?
            .set_default("http.enable_cors", true)?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("simulation.mode", "idle_delay")?
            .set_default("simulation.delay_ms", 2000)?
            .set_default("simulation.phase_pause_ms", 100)?
            .set_default("simulation.search_iterations", 10)?
            .set_default("simulation.analysis_iterations", 5)?
            .set_default("simulation.report_iterations", 4)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_without_a_config_file() {
        let cfg = Config::load_from("nonexistent-config").expect("defaults should load");
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.simulation.mode, SimulationMode::IdleDelay);
        assert_eq!(cfg.simulation.delay_ms, 2000);
        assert!(cfg.http.enable_cors);
        assert!(cfg.http.cors_allowed_origins.is_empty());
        assert!(cfg.report.file.is_none());
    }

    #[test]
    fn default_socket_addr_parses() {
        let cfg = Config::load_from("nonexistent-config").expect("defaults should load");
        let addr = cfg.get_socket_addr().expect("addr should parse");
        assert_eq!(addr.port(), 8000);
    }
}
