//! HTTP response building module
//!
//! Builders for the plain-text responses the application sends.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Build 200 OK plain-text response
pub fn build_text_response(body: impl Into<Bytes>) -> Response<Full<Bytes>> {
    build_status_response(StatusCode::OK, body)
}

/// Build plain-text response with an arbitrary status
pub fn build_status_response(status: StatusCode, body: impl Into<Bytes>) -> Response<Full<Bytes>> {
    let body = body.into();
    Response::builder()
        .status(status)
        .header("Content-Type", TEXT_PLAIN)
        .header("X-Content-Type-Options", "nosniff")
        .body(Full::new(body.clone()))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(body))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_status_response(StatusCode::NOT_FOUND, "404 page not found\n")
}

/// Build 405 Method Not Allowed response naming the permitted method
pub fn build_405_response(allow: &str) -> Response<Full<Bytes>> {
    let mut response = build_status_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed\n");
    match allow.parse() {
        Ok(value) => {
            response.headers_mut().insert(hyper::header::ALLOW, value);
        }
        Err(e) => log_build_error("405", &hyper::http::Error::from(e)),
    }
    response
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    build_status_response(StatusCode::PAYLOAD_TOO_LARGE, "413 Payload Too Large\n")
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<Full<Bytes>> {
    build_status_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error\n")
}

/// Build redirect response with a specific status code
pub fn build_redirect_response_with_code(target: &str, code: StatusCode) -> Response<Full<Bytes>> {
    Response::builder()
        .status(code)
        .header("Location", target)
        .header("Content-Type", TEXT_PLAIN)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error(code.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
