use crate::qa_config_dto::QaConfigDto;
use crate::QaConfigDefaults;
use crate::QaConfigError;
use crate::QaConfigLocation;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// The settings of the QA tools, as read from `qa.toml` and completed with defaults.
#[derive(Debug)]
pub struct QaConfig {
    pub(crate) data: QaConfigDto,
    pub(crate) config_location: QaConfigLocation,
    pub(crate) config_defaults: QaConfigDefaults,
}

impl QaConfig {
    pub fn config_location(&self) -> &QaConfigLocation {
        &self.config_location
    }

    pub fn broker_url(&self) -> Result<Url, QaConfigError> {
        let url = self
            .data
            .context_broker
            .url
            .as_deref()
            .unwrap_or(&self.config_defaults.default_broker_url);
        Url::parse(url).map_err(|source| QaConfigError::InvalidBrokerUrl {
            url: url.to_string(),
            source,
        })
    }

    pub fn api_version(&self) -> &str {
        self.data
            .context_broker
            .version
            .as_deref()
            .unwrap_or(&self.config_defaults.default_api_version)
    }

    pub fn service(&self) -> Option<&str> {
        self.data.tenant.service.as_deref()
    }

    pub fn subservice(&self) -> Option<&str> {
        self.data.tenant.subservice.as_deref()
    }

    pub fn token(&self) -> Option<&str> {
        self.data.tenant.token.as_deref()
    }

    pub fn http_timeout(&self) -> Duration {
        self.data
            .http
            .timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(self.config_defaults.default_http_timeout)
    }

    pub fn log_level(&self) -> Result<tracing::Level, QaConfigError> {
        match &self.data.log.level {
            Some(level) => tracing::Level::from_str(&level.to_uppercase()).map_err(|_| {
                QaConfigError::InvalidLogLevel {
                    name: level.to_string(),
                }
            }),
            None => Ok(self.config_defaults.default_log_level),
        }
    }
}
