// Application state module
// Dependencies shared by every request handler

use super::types::Config;
use crate::store::SnippetModel;

/// Application state, built once at startup and shared behind an `Arc`
pub struct AppState {
    pub config: Config,
    pub snippets: SnippetModel,
}

impl AppState {
    pub const fn new(config: Config, snippets: SnippetModel) -> Self {
        Self { config, snippets }
    }

    pub const fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}
