use crate::ClientError;
use crate::ServiceRequest;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::debug;
use tracing::error;

/// What the broker answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16) -> Self {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(self, body: impl Into<String>) -> Self {
        HttpResponse {
            body: body.into(),
            ..self
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The body as JSON, if any. Brokers answer `201 Created` with an empty body.
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }
}

/// The seam between the client and the network.
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    fn execute(&self, request: &ServiceRequest) -> Result<HttpResponse, ClientError>;
}

/// A blocking HTTP transport.
pub struct ReqwestTransport {
    http_con: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(http_con: reqwest::blocking::Client) -> Self {
        ReqwestTransport { http_con }
    }

    pub fn try_new() -> Result<Self, ClientError> {
        let http_con = reqwest::blocking::Client::builder()
            .build()
            .map_err(ClientError::HttpClient)?;
        Ok(ReqwestTransport { http_con })
    }

    fn send(&self, request: &ServiceRequest) -> Result<HttpResponse, ClientError> {
        let mut builder = self
            .http_con
            .request(request.method().clone(), request.url().clone());
        for (name, value) in request.headers() {
            builder = builder.header(name, value);
        }
        if let Some(payload) = request.payload() {
            builder = builder
                .header(CONTENT_TYPE, payload.content_type())
                .body(payload.text().to_string());
        }
        if let Some(timeout) = request.timeout() {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().map_err(|source| ClientError::Transport {
            method: request.method().clone(),
            url: request.url().clone(),
            source,
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.to_string(), value.to_string()))
            })
            .collect();
        let body = response.text().map_err(|source| ClientError::ResponseBody {
            method: request.method().clone(),
            url: request.url().clone(),
            source,
        })?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: &ServiceRequest) -> Result<HttpResponse, ClientError> {
        debug!(
            method = %request.method(),
            url = %request.url(),
            headers = ?request.headers(),
            "Sending request"
        );

        match self.send(request) {
            Ok(response) => {
                debug!(status = response.status, body = %response.body, "Received response");
                Ok(response)
            }
            Err(err) => {
                error!(
                    method = %request.method(),
                    url = %request.url(),
                    headers = ?request.headers(),
                    payload = request.payload().map(|p| p.text()).unwrap_or_default(),
                    "Request failed: {err}"
                );
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(200, true)]
    #[test_case(201, true)]
    #[test_case(204, true)]
    #[test_case(400, false)]
    #[test_case(422, false)]
    #[test_case(500, false)]
    fn success_status(status: u16, expected: bool) {
        assert_eq!(HttpResponse::new(status).is_success(), expected);
    }

    #[test]
    fn response_headers_are_case_insensitive() {
        let response = HttpResponse::new(201).with_header("Location", "/v2/entities/Room1");
        assert_eq!(response.header("location"), Some("/v2/entities/Room1"));
        assert_eq!(response.json(), None);
    }
}
