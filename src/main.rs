use std::sync::Arc;

use clap::Parser;
use tokio::sync::Notify;

use snippetbox::{config, logger, server, store};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = config::Cli::parse();
    let cfg = config::Config::load(&cli)?;
    logger::init(&cfg)?;

    // Worker thread count comes from config, defaulting to one per CPU core
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;

    // Nothing is served unless the database answers
    let snippets = store::connect(&cfg.database).await.map_err(|e| {
        logger::log_error(&format!("Cannot open database: {e}"));
        e
    })?;

    let listener = server::create_listener(addr)?;

    let shutdown = Arc::new(Notify::new());
    server::start_signal_handler(Arc::clone(&shutdown))?;

    logger::log_server_start(&addr, &cfg);

    let state = Arc::new(config::AppState::new(cfg, snippets));
    server::start_server_loop(listener, Arc::clone(&state), shutdown).await?;

    state.snippets.close().await;
    logger::log_server_stop();
    Ok(())
}
