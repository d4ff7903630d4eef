use qa_config::QaConfig;

pub const FIWARE_SERVICE: &str = "Fiware-Service";
pub const FIWARE_SERVICE_PATH: &str = "Fiware-ServicePath";
pub const X_AUTH_TOKEN: &str = "X-Auth-Token";

/// The multi-tenancy routing of the requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tenant {
    pub service: Option<String>,
    pub subservice: Option<String>,
    pub token: Option<String>,
}

impl Tenant {
    pub fn from_config(config: &QaConfig) -> Self {
        Tenant {
            service: config.service().map(str::to_string),
            subservice: config.subservice().map(str::to_string),
            token: config.token().map(str::to_string),
        }
    }

    pub fn with_service(self, service: impl Into<String>) -> Self {
        Tenant {
            service: Some(service.into()),
            ..self
        }
    }

    pub fn with_subservice(self, subservice: impl Into<String>) -> Self {
        Tenant {
            subservice: Some(subservice.into()),
            ..self
        }
    }

    pub fn with_token(self, token: impl Into<String>) -> Self {
        Tenant {
            token: Some(token.into()),
            ..self
        }
    }

    /// The headers to send, only for the values that are set.
    pub fn headers(&self) -> Vec<(&'static str, &str)> {
        [
            (FIWARE_SERVICE, &self.service),
            (FIWARE_SERVICE_PATH, &self.subservice),
            (X_AUTH_TOKEN, &self.token),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|value| (name, value)))
        .collect()
    }
}
