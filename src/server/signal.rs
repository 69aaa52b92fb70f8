// Signal handling module
//
// SIGTERM and SIGINT (Ctrl+C) both request a graceful shutdown.

use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger;

/// Register shutdown signal handlers and notify `shutdown` when one arrives.
///
/// Registration happens before this returns so failures surface at startup.
#[cfg(unix)]
pub fn start_signal_handler(shutdown: Arc<Notify>) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::spawn(async move {
        let name = tokio::select! {
            _ = sigterm.recv() => "SIGTERM",
            _ = sigint.recv() => "SIGINT",
        };
        logger::log_info(&format!("{name} received, initiating graceful shutdown"));
        // notify_one stores a permit in case the loop is not waiting yet
        shutdown.notify_one();
    });

    Ok(())
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: Arc<Notify>) -> std::io::Result<()> {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            logger::log_info("Ctrl+C received, initiating graceful shutdown");
            shutdown.notify_one();
        }
    });
    Ok(())
}
