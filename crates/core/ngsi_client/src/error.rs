use reqwest::Method;
use url::Url;

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("Malformed JSON payload: {source}\n{body}")]
    MalformedPayload {
        body: String,
        source: serde_json::Error,
    },

    #[error("{method} {url} failed")]
    Transport {
        method: Method,
        url: Url,
        source: reqwest::Error,
    },

    #[error("Failed to read the response of {method} {url}")]
    ResponseBody {
        method: Method,
        url: Url,
        source: reqwest::Error,
    },

    #[error("Invalid url {url:?}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Failed to create the HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error(transparent)]
    FromJsonWriter(#[from] json_writer::JsonWriterError),

    #[error(transparent)]
    FromQaConfig(#[from] qa_config::QaConfigError),
}
