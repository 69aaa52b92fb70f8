//! snippetbox: a small web application for sharing text snippets
//!
//! - [`store`]: SQLite-backed snippet storage
//! - [`handler`]: request routing and page handlers
//! - [`server`]: listener, accept loop and signal handling
//! - [`config`]: layered configuration and shared application state
//! - [`logger`]: info, error and access logging

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
pub mod store;
