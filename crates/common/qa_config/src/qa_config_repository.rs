use crate::qa_config_dto::QaConfigDto;
use crate::*;
use std::path::PathBuf;

/// QaConfigRepository is responsible for loading `QaConfig` from `qa.toml`.
#[derive(Debug)]
pub struct QaConfigRepository {
    config_location: QaConfigLocation,
    config_defaults: QaConfigDefaults,
}

impl QaConfigRepository {
    pub fn new(config_location: QaConfigLocation) -> Self {
        Self::new_with_defaults(config_location, QaConfigDefaults::default())
    }

    pub fn new_with_defaults(
        config_location: QaConfigLocation,
        config_defaults: QaConfigDefaults,
    ) -> Self {
        Self {
            config_location,
            config_defaults,
        }
    }

    pub fn get_config_location(&self) -> &QaConfigLocation {
        &self.config_location
    }

    /// Load `qa.toml`, falling back to the defaults when the file doesn't exist.
    pub fn load(&self) -> Result<QaConfig, QaConfigError> {
        self.read_file_or_default(self.config_location.qa_config_file_path())
    }

    fn read_file(&self, path: PathBuf) -> Result<QaConfig, QaConfigError> {
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let data = toml::from_str::<QaConfigDto>(&content)?;
                Ok(self.make_qa_config(data))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(QaConfigError::ConfigFileNotFound(path))
            }
            Err(err) => Err(QaConfigError::FromIo(err)),
        }
    }

    fn read_file_or_default(&self, path: PathBuf) -> Result<QaConfig, QaConfigError> {
        match self.read_file(path) {
            Ok(config) => Ok(config),
            Err(QaConfigError::ConfigFileNotFound(path)) => {
                tracing::debug!("No config file at {}, using defaults", path.display());
                Ok(self.make_qa_config(QaConfigDto::default()))
            }
            Err(err) => Err(err),
        }
    }

    fn make_qa_config(&self, data: QaConfigDto) -> QaConfig {
        QaConfig {
            data,
            config_location: self.config_location.clone(),
            config_defaults: self.config_defaults.clone(),
        }
    }
}
