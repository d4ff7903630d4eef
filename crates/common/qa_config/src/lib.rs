//! Configuration of the NGSI QA tools, read from `qa.toml`.

mod error;
mod log_config;
mod qa_config;
mod qa_config_defaults;
mod qa_config_dto;
mod qa_config_location;
mod qa_config_repository;

pub use self::error::*;
pub use self::log_config::*;
pub use self::qa_config::*;
pub use self::qa_config_defaults::*;
pub use self::qa_config_location::*;
pub use self::qa_config_repository::*;
