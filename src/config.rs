/// Default auth/API server used when `PORTAL_API_URL` is not set at build time.
pub const DEFAULT_API_URL: &str = "http://localhost:3001";
/// localStorage key holding the credential token.
pub const DEFAULT_TOKEN_KEY: &str = "__auth_provider_token__";
pub const DEFAULT_LOG_FILTER: &str = "portal_ui=debug";

/// Build-time configuration of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the API, without trailing slash
    pub api_url: String,
    pub token_key: String,
    /// `tracing-subscriber` filter directives
    pub log_filter: String,
}

impl AppConfig {
    /// Read `PORTAL_API_URL` and `PORTAL_LOG` as captured by the compiler.
    pub fn from_env() -> Self {
        Self::from_values(option_env!("PORTAL_API_URL"), option_env!("PORTAL_LOG"))
    }

    fn from_values(api_url: Option<&str>, log_filter: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(url) = api_url.filter(|url| !url.trim().is_empty()) {
            config = config.with_api_url(url);
        }
        if let Some(filter) = log_filter.filter(|filter| !filter.trim().is_empty()) {
            config.log_filter = filter.to_string();
        }
        config
    }

    #[must_use]
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.trim().trim_end_matches('/').to_string();
        self
    }

    /// Absolute URL of an endpoint relative to the API root
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.api_url, endpoint.trim_start_matches('/'))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}
