//! Application configuration. Transport settings.

use serde::Deserialize;

/// Default `User-Agent` of the HTTP client. The JSON fetcher overrides it per request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; polis-scraper/1.0)";

pub const DEFAULT_ACCEPT: &str = "application/json, text/plain, */*";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP client user agent. Read from POLIS_DEETS_USER_AGENT.
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Accept header. Read from POLIS_DEETS_ACCEPT.
    #[serde(default)]
    pub accept: Option<String>,

    /// Whole-request timeout in seconds. Read from POLIS_DEETS_TIMEOUT_SECS.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Reject non-2xx responses (default true). Read from POLIS_DEETS_STRICT_HTTP.
    #[serde(default)]
    pub strict_http: Option<bool>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("POLIS_DEETS").try_parsing(true));
        if let Ok(path) = std::env::var("POLIS_DEETS_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    pub fn user_agent_or_default(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string())
    }

    pub fn accept_or_default(&self) -> String {
        self.accept
            .clone()
            .unwrap_or_else(|| DEFAULT_ACCEPT.to_string())
    }

    /// Returns the request timeout in seconds. Defaults to 30 if unset.
    pub fn timeout_secs_or_default(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    pub fn strict_http_or_default(&self) -> bool {
        self.strict_http.unwrap_or(true)
    }
}
