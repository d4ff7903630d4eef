use std::path::Path;
use std::path::PathBuf;

pub const DEFAULT_QA_CONFIG_PATH: &str = "/etc/ngsi-qa";
const QA_CONFIG_FILE: &str = "qa.toml";

/// Information about where `qa.toml` is located.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct QaConfigLocation {
    /// Root directory where `qa.toml` is located.
    qa_config_root_path: PathBuf,
}

impl Default for QaConfigLocation {
    fn default() -> Self {
        Self::from_custom_root(DEFAULT_QA_CONFIG_PATH)
    }
}

impl QaConfigLocation {
    pub fn from_custom_root(qa_config_root_path: impl AsRef<Path>) -> Self {
        Self {
            qa_config_root_path: qa_config_root_path.as_ref().to_path_buf(),
        }
    }

    pub fn qa_config_root_path(&self) -> &Path {
        &self.qa_config_root_path
    }

    pub fn qa_config_file_path(&self) -> PathBuf {
        self.qa_config_root_path.join(QA_CONFIG_FILE)
    }
}

#[test]
fn test_from_custom_root() {
    let config_location = QaConfigLocation::from_custom_root("/opt/etc/qa");
    assert_eq!(
        config_location.qa_config_root_path(),
        PathBuf::from("/opt/etc/qa")
    );
    assert_eq!(
        config_location.qa_config_file_path(),
        PathBuf::from("/opt/etc/qa/qa.toml")
    );
}

#[test]
fn test_default_location() {
    let config_location = QaConfigLocation::default();
    assert_eq!(
        config_location.qa_config_file_path(),
        PathBuf::from("/etc/ngsi-qa/qa.toml")
    );
}
