/// Server configuration
///
/// # Environment variables
///
/// Every setting can be overridden through the environment:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 3000 | HTTP API port |
/// | DATABASE_PATH | bridge.db | SQLite database file |
/// | MAILCHIMP_API_KEY | (empty) | MailChimp API key, `<key>-<dc>` |
/// | MAILCHIMP_BASE_URL | (derived from key) | API root override for sandboxes |
/// | REQUEST_TIMEOUT_MS | 30000 | Remote request timeout (ms) |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | LOG_DIR | (none) | Directory for rotated log files |
///
/// # Example
///
/// ```ignore
/// DATABASE_PATH=/data/bridge.db HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// SQLite database file path
    pub database_path: String,
    /// MailChimp API key; the datacenter suffix selects the API host
    pub mailchimp_api_key: String,
    /// Optional API root override (sandboxes, local stand-ins)
    pub mailchimp_base_url: Option<String>,
    /// Remote request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Optional directory for daily-rotated log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "bridge.db".into()),
            mailchimp_api_key: std::env::var("MAILCHIMP_API_KEY").unwrap_or_default(),
            mailchimp_base_url: std::env::var("MAILCHIMP_BASE_URL").ok(),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30_000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 3000,
            database_path: "bridge.db".into(),
            mailchimp_api_key: String::new(),
            mailchimp_base_url: None,
            request_timeout_ms: 30_000,
            environment: "development".into(),
            log_dir: None,
        }
    }
}
