use crate::ClientError;
use qa_config::QaConfig;
use url::Url;

/// Where the NGSI resources of a context broker are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextBrokerEndPoint {
    base_url: String,
    version: String,
}

impl ContextBrokerEndPoint {
    pub fn new(base_url: &str, version: &str) -> Self {
        let mut url = String::new();
        if !base_url.starts_with("http") {
            url.push_str("http://");
        }
        url.push_str(base_url.trim_end_matches('/'));

        ContextBrokerEndPoint {
            base_url: url,
            version: version.trim_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &QaConfig) -> Result<Self, ClientError> {
        Ok(Self::new(config.broker_url()?.as_str(), config.api_version()))
    }

    pub fn get_url_for_entities(&self) -> Result<Url, ClientError> {
        self.url_for("entities")
    }

    pub fn get_url_for_subscriptions(&self) -> Result<Url, ClientError> {
        self.url_for("subscriptions")
    }

    fn url_for(&self, resource: &str) -> Result<Url, ClientError> {
        let url = format!("{}/{}/{}", self.base_url, self.version, resource);
        Url::parse(&url).map_err(|source| ClientError::InvalidUrl { url, source })
    }
}
