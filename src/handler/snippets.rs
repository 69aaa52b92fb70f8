//! Snippet page handlers

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response};
use url::form_urlencoded;

use crate::http;

/// Home page; only the exact root path, everything else falling through here is 404
pub fn home(path: &str) -> Response<Full<Bytes>> {
    if path != "/" {
        return http::build_404_response();
    }
    http::build_text_response("Hello World!")
}

/// Snippet view placeholder
pub fn view() -> Response<Full<Bytes>> {
    http::build_text_response("View information")
}

/// Echo the snippet id from `?id=`; bad or negative ids are reported as not found
pub fn snippet_view(query: Option<&str>) -> Response<Full<Bytes>> {
    match parse_id(query) {
        Some(id) => http::build_text_response(format!("Snippet {id}")),
        None => http::build_404_response(),
    }
}

/// Snippet creation placeholder, POST only
pub fn create(method: &Method) -> Response<Full<Bytes>> {
    if method != Method::POST {
        return http::build_405_response(Method::POST.as_str());
    }
    http::build_text_response("Create information")
}

/// First `id` query parameter, form-decoded, as a non-negative integer
fn parse_id(query: Option<&str>) -> Option<i64> {
    let (_, value) = form_urlencoded::parse(query?.as_bytes()).find(|(key, _)| key == "id")?;

    value.parse::<i64>().ok().filter(|id| *id >= 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id(Some("id=7")), Some(7));
        assert_eq!(parse_id(Some("x=1&id=0")), Some(0));
        assert_eq!(parse_id(Some("id=3&id=9")), Some(3));
        assert_eq!(parse_id(Some("id=-1")), None);
        assert_eq!(parse_id(Some("id=abc")), None);
        assert_eq!(parse_id(Some("id=")), None);
        assert_eq!(parse_id(Some("id")), None);
        assert_eq!(parse_id(Some("other=5")), None);
        assert_eq!(parse_id(Some("%69d=8")), Some(8));
        assert_eq!(parse_id(Some("id=%34%32")), Some(42));
        // '+' decodes to a space
        assert_eq!(parse_id(Some("id=+5")), None);
        assert_eq!(parse_id(Some("id=%2B5")), Some(5));
        assert_eq!(parse_id(None), None);
    }

    #[test]
    fn test_home_only_root() {
        assert_eq!(home("/").status(), 200);
        assert_eq!(home("/missing").status(), 404);
    }

    #[test]
    fn test_create_method_check() {
        assert_eq!(create(&Method::POST).status(), 200);
        let response = create(&Method::GET);
        assert_eq!(response.status(), 405);
        assert_eq!(response.headers()["allow"], "POST");
    }
}
