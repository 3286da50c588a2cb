// Server loop module
// Accept loop with graceful shutdown

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// How long shutdown waits for in-flight requests before giving up.
/// Sized to cover the longest observed idle-delay variant (10s) plus slack.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(15);

/// Accept connections until a shutdown signal arrives, then drain.
///
/// Each accepted connection is served on its own task; a request suspended
/// in an idle-delay sleep therefore never stalls other connections.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) -> Result<(), Box<dyn std::error::Error>> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => {
                break;
            }
        }
    }

    // Stop accepting immediately, then let in-flight requests finish
    drop(listener);
    drain_connections(&active_connections).await;
    logger::log_shutdown();
    Ok(())
}

/// Wait for active connections to complete, bounded by `DRAIN_TIMEOUT`.
async fn drain_connections(active_connections: &Arc<AtomicUsize>) {
    let deadline = tokio::time::Instant::now() + DRAIN_TIMEOUT;

    loop {
        let active = active_connections.load(Ordering::SeqCst);
        if active == 0 {
            break;
        }
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Shutdown drain timed out with {active} connection(s) still active"
            ));
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}
