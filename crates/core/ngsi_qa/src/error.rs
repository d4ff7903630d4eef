use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum NgsiQaError {
    #[error("Failed to read the scenario file {path:?}")]
    ScenarioRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid scenario file {path:?}")]
    ScenarioParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Scenario step {step}: no {kind} context was produced")]
    MissingContext { step: usize, kind: &'static str },

    #[error("Failed to write the payload")]
    Output(#[from] std::io::Error),

    #[error(transparent)]
    FromQaConfig(#[from] qa_config::QaConfigError),

    #[error(transparent)]
    FromClient(#[from] ngsi_client::ClientError),

    #[error(transparent)]
    FromJsonWriter(#[from] ngsi_payload::JsonWriterError),

    #[error(transparent)]
    FromSerdeJson(#[from] serde_json::Error),
}
