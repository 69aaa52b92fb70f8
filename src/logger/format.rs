//! Access log format module
//!
//! Supported formats:
//! - `combined` (Apache/Nginx combined format, the default)
//! - `common` (Common Log Format - CLF)
//! - `json` (one JSON object per line)

use chrono::{DateTime, Local};

const CLF_TIME: &str = "%d/%b/%Y:%H:%M:%S %z";

/// One served request
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    pub remote_addr: String,
    pub time: DateTime<Local>,
    pub method: String,
    pub path: String,
    /// Query string (without leading ?)
    pub query: Option<String>,
    pub http_version: String,
    pub status: u16,
    pub body_bytes: usize,
    pub user_agent: Option<String>,
    /// Handler time in microseconds
    pub request_time_us: u64,
}

impl AccessLogEntry {
    /// Create a new access log entry stamped with the current time
    pub fn new(remote_addr: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            query: None,
            http_version: "1.1".to_string(),
            status: 200,
            body_bytes: 0,
            user_agent: None,
            request_time_us: 0,
        }
    }

    /// Format the entry; unknown format names fall back to `combined`
    pub fn format(&self, format: &str) -> String {
        match format {
            "common" => self.format_common(),
            "json" => self.format_json(),
            _ => self.format_combined(),
        }
    }

    fn request_line(&self) -> String {
        let query = self
            .query
            .as_ref()
            .map(|q| format!("?{q}"))
            .unwrap_or_default();
        format!("{} {}{query} HTTP/{}", self.method, self.path, self.http_version)
    }

    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {}",
            self.remote_addr,
            self.time.format(CLF_TIME),
            self.request_line(),
            self.status,
            self.body_bytes,
        )
    }

    fn format_combined(&self) -> String {
        format!(
            "{} \"-\" \"{}\" {}us",
            self.format_common(),
            self.user_agent.as_deref().unwrap_or("-"),
            self.request_time_us,
        )
    }

    fn format_json(&self) -> String {
        let optional = |v: Option<&String>| {
            v.map_or_else(|| "null".to_string(), |s| format!("\"{}\"", escape_json(s)))
        };

        format!(
            r#"{{"remote_addr":"{}","time":"{}","method":"{}","path":"{}","query":{},"http_version":"{}","status":{},"body_bytes":{},"user_agent":{},"request_time_us":{}}}"#,
            escape_json(&self.remote_addr),
            self.time.to_rfc3339(),
            escape_json(&self.method),
            escape_json(&self.path),
            optional(self.query.as_ref()),
            escape_json(&self.http_version),
            self.status,
            self.body_bytes,
            optional(self.user_agent.as_ref()),
            self.request_time_us,
        )
    }
}

fn escape_json(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_entry() -> AccessLogEntry {
        let mut entry = AccessLogEntry::new(
            "10.0.0.7".to_string(),
            "GET".to_string(),
            "/snippetView/".to_string(),
        );
        entry.query = Some("id=3".to_string());
        entry.status = 200;
        entry.body_bytes = 9;
        entry.user_agent = Some("curl/8.5.0".to_string());
        entry.request_time_us = 120;
        entry
    }

    #[test]
    fn test_format_combined() {
        let log = create_test_entry().format("combined");
        assert!(log.starts_with("10.0.0.7 - - ["));
        assert!(log.contains("\"GET /snippetView/?id=3 HTTP/1.1\" 200 9"));
        assert!(log.contains("\"curl/8.5.0\""));
        assert!(log.ends_with("120us"));
    }

    #[test]
    fn test_format_common() {
        let log = create_test_entry().format("common");
        assert!(log.ends_with("\"GET /snippetView/?id=3 HTTP/1.1\" 200 9"));
        assert!(!log.contains("curl"));
    }

    #[test]
    fn test_format_json() {
        let mut entry = create_test_entry();
        entry.user_agent = None;
        entry.path = "/we\"ird".to_string();
        let log = entry.format("json");
        assert!(log.contains(r#""path":"/we\"ird""#));
        assert!(log.contains(r#""query":"id=3""#));
        assert!(log.contains(r#""user_agent":null"#));
        assert!(log.contains(r#""status":200"#));
    }

    #[test]
    fn test_unknown_format_is_combined() {
        let entry = create_test_entry();
        assert_eq!(entry.format("bogus"), entry.format("combined"));
    }
}
