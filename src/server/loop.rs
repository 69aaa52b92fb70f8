// Server loop module
// Accepts connections until shutdown is requested, then drains in-flight ones

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// Poll interval while waiting for open connections to finish
const DRAIN_POLL: Duration = Duration::from_millis(50);

/// Run the accept loop until `shutdown` is notified.
///
/// After the listener closes, waits up to the configured write timeout for
/// active connections to finish before returning.
#[allow(clippy::ignored_unit_patterns)]
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) -> std::io::Result<()> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            _ = shutdown.notified() => {
                logger::log_info("Shutdown requested, no longer accepting connections");
                break;
            }
        }
    }

    drop(listener);
    drain_connections(&active_connections, Duration::from_secs(state.config.performance.write_timeout)).await;
    Ok(())
}

/// Wait for the active connection count to reach zero, bounded by `grace`
async fn drain_connections(active: &AtomicUsize, grace: Duration) {
    let drained = tokio::time::timeout(grace, async {
        while active.load(Ordering::SeqCst) > 0 {
            tokio::time::sleep(DRAIN_POLL).await;
        }
    })
    .await;

    if drained.is_err() {
        logger::log_warning(&format!(
            "{} connection(s) still open after {}s grace period",
            active.load(Ordering::SeqCst),
            grace.as_secs()
        ));
    }
}
