// Application state module
// Everything a request handler needs, resolved once at bootstrap

use super::types::Config;
use crate::http::CorsPolicy;
use crate::report::ReportStore;
use crate::simulate::LatencyPolicy;

/// Shared application state, constructed once and passed to the server loop.
/// There is no runtime reconfiguration; all fields are immutable after boot.
pub struct AppState {
    pub config: Config,
    pub latency: LatencyPolicy,
    pub report: ReportStore,
    pub cors: CorsPolicy,
}

impl AppState {
    /// Resolve derived state (latency policy, report payload, CORS) from config.
    pub fn new(config: Config) -> Self {
        let latency = LatencyPolicy::from_config(&config.simulation);
        let report = ReportStore::load(&config.report);
        let cors = CorsPolicy::from_config(&config.http);
        Self {
            config,
            latency,
            report,
            cors,
        }
    }
}
