// Connection handling module
// Accepts a single TCP connection and serves it on its own task

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Accept a connection, enforcing the connection limit, and hand it to a task.
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address
/// * `state` - Shared application state
/// * `conn_counter` - Active connection counter
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<AppState>,
    conn_counter: &Arc<AtomicUsize>,
) {
    // Increment counter first, then check limit (prevents race condition)
    let prev_count = conn_counter.fetch_add(1, Ordering::SeqCst);

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            // Exceeded limit: rollback counter and reject
            conn_counter.fetch_sub(1, Ordering::SeqCst);
            logger::log_warning(&format!(
                "Max connections reached: {prev_count}/{max_conn}. Connection rejected."
            ));
            drop(stream);
            return;
        }
    }

    if state.access_log_enabled() {
        logger::log_connection_accepted(&peer_addr);
    }

    handle_connection(stream, peer_addr, Arc::clone(state), Arc::clone(conn_counter));
}

/// Serve one connection in a spawned task.
///
/// HTTP/1.1 with keep-alive when configured; the whole connection is bounded
/// by the larger of the read and write timeouts. The counter is decremented
/// when the task ends.
fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
    conn_counter: Arc<AtomicUsize>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let performance = &state.config.performance;
        let keep_alive = performance.keep_alive_timeout > 0;
        let timeout_duration = std::time::Duration::from_secs(std::cmp::max(
            performance.read_timeout,
            performance.write_timeout,
        ));

        let mut builder = http1::Builder::new();
        builder.keep_alive(keep_alive);

        let service_state = Arc::clone(&state);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| handler::handle_request(req, Arc::clone(&service_state), peer_addr)),
        );

        match tokio::time::timeout(timeout_duration, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => {
                logger::log_warning(&format!(
                    "Connection from {peer_addr} timed out after {} seconds",
                    timeout_duration.as_secs()
                ));
            }
        }

        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Cli, Config};
    use crate::server::create_listener;
    use crate::store::{memory_pool, SnippetModel};
    use clap::Parser;
    use std::time::Duration;
    use tokio::io::AsyncReadExt;
    use tokio::net::{TcpListener, TcpStream};

    async fn create_test_state(max_connections: Option<u64>) -> Arc<AppState> {
        let cli = Cli::parse_from(["snippetbox", "--config", "does-not-exist"]);
        let mut config = Config::load(&cli).unwrap();
        config.logging.access_log = false;
        config.performance.max_connections = max_connections;
        Arc::new(AppState::new(config, SnippetModel::new(memory_pool().await)))
    }

    async fn connect_pair() -> (TcpListener, TcpStream) {
        let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let client = TcpStream::connect(listener.local_addr().unwrap()).await.unwrap();
        (listener, client)
    }

    #[tokio::test]
    async fn test_over_limit_connection_is_dropped() {
        let state = create_test_state(Some(1)).await;
        let counter = Arc::new(AtomicUsize::new(1));
        let (listener, mut client) = connect_pair().await;

        let (stream, peer) = listener.accept().await.unwrap();
        accept_connection(stream, peer, &state, &counter);
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        // Server side is closed without a response
        let mut buf = [0u8; 64];
        let n = tokio::time::timeout(Duration::from_secs(5), client.read(&mut buf))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(n, 0);
    }

    #[tokio::test]
    async fn test_zero_limit_rejects_everything() {
        let state = create_test_state(Some(0)).await;
        let counter = Arc::new(AtomicUsize::new(0));
        let (listener, _client) = connect_pair().await;

        let (stream, peer) = listener.accept().await.unwrap();
        accept_connection(stream, peer, &state, &counter);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_under_limit_connection_is_counted_until_closed() {
        let state = create_test_state(Some(2)).await;
        let counter = Arc::new(AtomicUsize::new(1));
        let (listener, client) = connect_pair().await;

        let (stream, peer) = listener.accept().await.unwrap();
        accept_connection(stream, peer, &state, &counter);
        assert_eq!(counter.load(Ordering::SeqCst), 2);

        drop(client);
        tokio::time::timeout(Duration::from_secs(5), async {
            while counter.load(Ordering::SeqCst) != 1 {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap();
    }
}
