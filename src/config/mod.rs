// Configuration module entry point
// Loads layered configuration (file, environment, command-line flags) and holds runtime state

mod state;
mod types;

use std::net::SocketAddr;

use clap::Parser;

pub use state::AppState;
pub use types::{
    Config, DatabaseConfig, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig,
};

/// Command-line flags; anything given here wins over file and environment
#[derive(Parser, Debug)]
#[command(name = "snippetbox")]
#[command(about = "Snippet sharing web application", long_about = None)]
pub struct Cli {
    /// Configuration file path (without extension)
    #[arg(long, default_value = "config")]
    pub config: String,

    /// HTTP listen address, e.g. `:4000` or `127.0.0.1:4000`
    #[arg(long)]
    pub addr: Option<String>,

    /// Database connection string
    #[arg(long)]
    pub dsn: Option<String>,
}

impl Config {
    /// Load configuration for the given flags
    ///
    /// Precedence, lowest first: defaults, config file, `SNIPPETBOX__*`
    /// environment variables, command-line flags.
    pub fn load(cli: &Cli) -> Result<Self, config::ConfigError> {
        let (host, port) = match cli.addr.as_deref() {
            Some(addr) => {
                let (host, port) = split_addr(addr).map_err(config::ConfigError::Message)?;
                (Some(host), Some(i64::from(port)))
            }
            None => (None, None),
        };

        let settings = config::Config::builder()
            .add_source(config::File::with_name(&cli.config).required(false))
            .add_source(config::Environment::with_prefix("SNIPPETBOX").separator("__"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 4000)?
            .set_default("database.dsn", "sqlite://snippetbox.db?mode=rwc")?
            .set_default("database.max_connections", 10)?
            .set_default("database.acquire_timeout_secs", 30)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "snippetbox")?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_override_option("server.host", host)?
            .set_override_option("server.port", port)?
            .set_override_option("database.dsn", cli.dsn.clone())?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        let host = &self.server.host;
        let host = if host.contains(':') {
            format!("[{host}]")
        } else {
            host.clone()
        };
        format!("{host}:{}", self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// Split `host:port`; an empty host (`:4000`) means all interfaces
fn split_addr(addr: &str) -> Result<(String, u16), String> {
    let (host, port) = addr
        .rsplit_once(':')
        .ok_or_else(|| format!("Invalid address '{addr}': missing port"))?;
    let port = port
        .parse::<u16>()
        .map_err(|e| format!("Invalid port in '{addr}': {e}"))?;
    let host = match host.trim_start_matches('[').trim_end_matches(']') {
        "" => "0.0.0.0".to_string(),
        h => h.to_string(),
    };
    Ok((host, port))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("snippetbox").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let config = Config::load(&cli(&["--config", "does-not-exist"])).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.logging.access_log_format, "combined");
        assert!(config.logging.access_log_file.is_none());
    }

    #[test]
    fn test_flags_override() {
        let config = Config::load(&cli(&[
            "--config",
            "does-not-exist",
            "--addr",
            ":8081",
            "--dsn",
            "sqlite::memory:",
        ]))
        .unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.database.dsn, "sqlite::memory:");
        assert_eq!(
            config.get_socket_addr().unwrap(),
            "0.0.0.0:8081".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_split_addr() {
        assert_eq!(split_addr("localhost:80").unwrap(), ("localhost".to_string(), 80));
        assert_eq!(split_addr("[::1]:4000").unwrap(), ("::1".to_string(), 4000));
        assert!(split_addr("4000").is_err());
        assert!(split_addr(":http").is_err());
    }

    #[test]
    fn test_bad_addr_flag_fails_load() {
        assert!(Config::load(&cli(&["--config", "does-not-exist", "--addr", "nope"])).is_err());
    }
}
