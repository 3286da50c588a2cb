use std::sync::Arc;
use std::time::Duration;

mod config;
mod handler;
mod http;
mod logger;
mod report;
mod server;
mod simulate;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config".to_string());
    let cfg = config::Config::load_from(&config_path)?;
    logger::init(&cfg)?;

    // Build the Tokio runtime with the configured worker thread count
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(run(cfg))
}

/// Application bootstrap: config -> state -> listener -> serve loop.
/// All state is constructed here and passed down; nothing lives at module
/// scope except the log writer.
async fn run(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let state = Arc::new(config::AppState::new(cfg));

    warn_if_delay_exceeds_timeout(&state);

    let listener = server::create_reusable_listener(addr)?;
    logger::log_server_start(&addr, &state.config, &state.latency.describe());

    let shutdown = server::spawn_shutdown_listener();
    server::start_server_loop(listener, state, shutdown).await
}

/// A simulated delay longer than the connection timeout would make every
/// query fail with a timeout; flag the misconfiguration at startup.
fn warn_if_delay_exceeds_timeout(state: &Arc<config::AppState>) {
    let timeout = Duration::from_secs(std::cmp::max(
        state.config.performance.read_timeout,
        state.config.performance.write_timeout,
    ));
    let floor = state.latency.floor();
    if floor >= timeout {
        logger::log_warning(&format!(
            "Simulated latency floor ({}ms) is not below the connection timeout ({}s); \
             queries will time out",
            floor.as_millis(),
            timeout.as_secs()
        ));
    }
}
