//! Liveness and readiness checks

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use super::server_error;
use crate::config::AppState;
use crate::http;

pub const LIVENESS_PATH: &str = "/healthz";
pub const READINESS_PATH: &str = "/readyz";

/// The process is up
pub fn liveness() -> Response<Full<Bytes>> {
    http::build_text_response("ok")
}

/// The process can reach its database
pub async fn readiness(state: &AppState) -> Response<Full<Bytes>> {
    match state.snippets.ping().await {
        Ok(()) => http::build_text_response("ok"),
        Err(err) => server_error(&err),
    }
}
