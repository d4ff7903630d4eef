#[derive(thiserror::Error, Debug)]
pub enum QaConfigError {
    #[error("TOML parse error")]
    TOMLParseError(#[from] toml::de::Error),

    #[error("I/O error")]
    FromIo(#[from] std::io::Error),

    #[error("Invalid context broker url {url:?}: {source}")]
    InvalidBrokerUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Invalid log level: {name:?}, supported levels are info, warn, error and debug")]
    InvalidLogLevel { name: String },

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(std::path::PathBuf),
}
