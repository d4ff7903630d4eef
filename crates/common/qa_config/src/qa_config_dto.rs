//! Crate-private plain-old data-type used for deserialization.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct QaConfigDto {
    /// Where the context broker under test listens
    #[serde(default)]
    pub(crate) context_broker: ContextBrokerConfigDto,

    /// Multi-tenancy headers sent with every request
    #[serde(default)]
    pub(crate) tenant: TenantConfigDto,

    #[serde(default)]
    pub(crate) http: HttpConfigDto,

    #[serde(default)]
    pub(crate) log: LogConfigDto,
}

/// Represents the `[context_broker]` section of `qa.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ContextBrokerConfigDto {
    /// Base url, e.g. `http://localhost:1026`
    pub(crate) url: Option<String>,

    /// API version path segment, e.g. `v2`
    pub(crate) version: Option<String>,
}

/// Represents the `[tenant]` section of `qa.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TenantConfigDto {
    /// Sent as `Fiware-Service`
    pub(crate) service: Option<String>,

    /// Sent as `Fiware-ServicePath`
    pub(crate) subservice: Option<String>,

    /// Sent as `X-Auth-Token`
    pub(crate) token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct HttpConfigDto {
    pub(crate) timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct LogConfigDto {
    pub(crate) level: Option<String>,
}
