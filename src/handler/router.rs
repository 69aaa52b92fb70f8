//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: body size check, path lookup,
//! handler dispatch and access logging.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::http::request::Parts;
use hyper::{Request, Response, StatusCode};

use super::{health, snippets};
use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};

/// Subtree route; requests below it go to the snippet view
const SNIPPET_VIEW_PREFIX: &str = "/snippetView/";

/// Handlers reachable by path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Home,
    View,
    Create,
    SnippetView,
    SnippetViewRedirect,
    Liveness,
    Readiness,
}

/// Exact-match routes, checked before the subtree and the catch-all
const EXACT_ROUTES: &[(&str, Route)] = &[
    ("/view", Route::View),
    ("/create", Route::Create),
    ("/snippetView", Route::SnippetViewRedirect),
    (health::LIVENESS_PATH, Route::Liveness),
    (health::READINESS_PATH, Route::Readiness),
];

/// Resolve a path to its handler; anything unmatched falls through to home
fn match_route(path: &str) -> Route {
    if let Some((_, route)) = EXACT_ROUTES.iter().find(|(p, _)| *p == path) {
        return *route;
    }
    if path.starts_with(SNIPPET_VIEW_PREFIX) {
        return Route::SnippetView;
    }
    Route::Home
}

/// Main entry point for HTTP request handling
///
/// No handler reads the body, so only the request head is kept.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (parts, _) = req.into_parts();

    let mut response = match check_body_size(&parts, state.config.http.max_body_size) {
        Some(resp) => resp,
        None => route_request(&parts, &state).await,
    };

    if let Ok(value) = state.config.http.server_name.parse() {
        response.headers_mut().insert(hyper::header::SERVER, value);
    }

    if state.access_log_enabled() {
        log_access(&parts, &response, peer_addr, started, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Dispatch to the handler owning the request path
async fn route_request(parts: &Parts, state: &AppState) -> Response<Full<Bytes>> {
    let uri = &parts.uri;
    match match_route(uri.path()) {
        Route::Home => snippets::home(uri.path()),
        Route::View => snippets::view(),
        Route::Create => snippets::create(&parts.method),
        Route::SnippetView => snippets::snippet_view(uri.query()),
        Route::SnippetViewRedirect => {
            let target = uri.query().map_or_else(
                || SNIPPET_VIEW_PREFIX.to_string(),
                |q| format!("{SNIPPET_VIEW_PREFIX}?{q}"),
            );
            http::build_redirect_response_with_code(&target, StatusCode::MOVED_PERMANENTLY)
        }
        Route::Liveness => health::liveness(),
        Route::Readiness => health::readiness(state).await,
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(parts: &Parts, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = parts.headers.get(hyper::header::CONTENT_LENGTH)?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_warning(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

fn log_access(
    parts: &Parts,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
    format: &str,
) {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        parts.method.to_string(),
        parts.uri.path().to_string(),
    );
    entry.query = parts.uri.query().map(ToString::to_string);
    entry.http_version = format!("{:?}", parts.version)
        .trim_start_matches("HTTP/")
        .to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = usize::try_from(response.body().size_hint().lower()).unwrap_or(usize::MAX);
    entry.user_agent = parts
        .headers
        .get(hyper::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_access(&entry, format);
}
