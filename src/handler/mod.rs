//! Request handler module
//!
//! Routing dispatch and the individual page handlers.

pub mod health;
pub mod router;
pub mod snippets;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::http;
use crate::logger;

// Re-export main entry point
pub use router::handle_request;

/// Log a data-access failure for operators and answer 500
pub fn server_error(err: &impl std::fmt::Display) -> Response<Full<Bytes>> {
    logger::log_error(&err.to_string());
    http::build_500_response()
}
