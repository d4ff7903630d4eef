use crate::ClientError;
use crate::Tenant;
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;
use url::Url;

pub const APPLICATION_JSON: &str = "application/json";

/// A request body, as produced by the payload builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    content_type: String,
    text: String,
}

impl Payload {
    pub fn json(text: impl Into<String>) -> Self {
        Payload {
            content_type: APPLICATION_JSON.into(),
            text: text.into(),
        }
    }

    pub fn from_value(value: &Value) -> Self {
        Payload::json(value.to_string())
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parse a JSON payload, so a malformed one is rejected before being sent.
    pub fn validate(&self) -> Result<(), ClientError> {
        serde_json::from_str::<Value>(&self.text).map_err(|source| {
            ClientError::MalformedPayload {
                body: self.text.clone(),
                source,
            }
        })?;
        Ok(())
    }
}

/// One HTTP request, built step by step and never mutated once sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRequest {
    method: Method,
    url: Url,
    headers: Vec<(String, String)>,
    payload: Option<Payload>,
    timeout: Option<Duration>,
}

impl ServiceRequest {
    pub fn new(method: Method, url: Url) -> Self {
        ServiceRequest {
            method,
            url,
            headers: Vec::new(),
            payload: None,
            timeout: None,
        }
    }

    pub fn post(url: Url) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_tenant(self, tenant: &Tenant) -> Self {
        tenant
            .headers()
            .into_iter()
            .fold(self, |request, (name, value)| request.with_header(name, value))
    }

    /// Query parameters are forwarded verbatim, only percent-encoded.
    pub fn with_query(mut self, name: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(name, value);
        self
    }

    pub fn with_payload(self, payload: Payload) -> Self {
        ServiceRequest {
            payload: Some(payload),
            ..self
        }
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        ServiceRequest {
            timeout: Some(timeout),
            ..self
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
