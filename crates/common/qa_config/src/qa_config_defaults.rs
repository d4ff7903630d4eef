use std::time::Duration;

const DEFAULT_BROKER_URL: &str = "http://localhost:1026";
const DEFAULT_API_VERSION: &str = "v2";
const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;

/// Values used by `QaConfig` when a setting is missing from `qa.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QaConfigDefaults {
    pub default_broker_url: String,
    pub default_api_version: String,
    pub default_http_timeout: Duration,
    pub default_log_level: tracing::Level,
}

impl Default for QaConfigDefaults {
    fn default() -> Self {
        Self {
            default_broker_url: DEFAULT_BROKER_URL.into(),
            default_api_version: DEFAULT_API_VERSION.into(),
            default_http_timeout: Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS),
            default_log_level: tracing::Level::INFO,
        }
    }
}
