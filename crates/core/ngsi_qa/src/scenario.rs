use crate::command::Command;
use crate::entity::report;
use crate::entity::write_entities;
use crate::error::NgsiQaError;
use crate::subscription::write_subscription;
use ngsi_client::ContextBrokerClient;
use ngsi_payload::AttributeMode;
use ngsi_payload::Scenario;
use ngsi_payload::StepTable;
use serde::Deserialize;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;

/// A sequence of steps, as read from a TOML file.
///
/// ```toml
/// [[step]]
/// kind = "entity"
/// mode = "keyValues"
///
/// [step.params]
/// entities_id = "random=8"
/// attributes_name = "temperature"
/// attributes_value = "23"
///
/// [[step]]
/// kind = "entity"
///
/// [step.params]
/// entities_id = "the same value of the previous request"
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioFile {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    pub kind: StepKind,
    #[serde(default)]
    pub mode: AttributeMode,
    #[serde(default)]
    pub raw: bool,
    #[serde(default)]
    pub params: toml::Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Entity,
    Subscription,
}

impl ScenarioFile {
    pub fn read(path: &Path) -> Result<Self, NgsiQaError> {
        let content = std::fs::read_to_string(path).map_err(|source| NgsiQaError::ScenarioRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| NgsiQaError::ScenarioParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Step {
    /// Non-string TOML values are given as written, so `entities_number = 3` works too.
    pub fn table(&self) -> StepTable {
        self.params
            .iter()
            .map(|(key, value)| match value {
                toml::Value::String(value) => (key.clone(), value.clone()),
                value => (key.clone(), value.to_string()),
            })
            .collect()
    }
}

pub struct ScenarioCommand {
    pub path: PathBuf,
    pub client: Option<ContextBrokerClient>,
}

impl Command for ScenarioCommand {
    fn description(&self) -> String {
        format!("play the scenario {:?}", self.path)
    }

    fn execute(&self, out: &mut dyn Write) -> Result<(), NgsiQaError> {
        let file = ScenarioFile::read(&self.path)?;
        play(&file, self.client.as_ref(), out)?;
        Ok(())
    }
}

/// Play the steps in order, each one resolved against the previous one of the same kind.
pub fn play(
    file: &ScenarioFile,
    client: Option<&ContextBrokerClient>,
    out: &mut dyn Write,
) -> Result<Scenario, NgsiQaError> {
    let mut scenario = Scenario::new();

    for (index, step) in file.steps.iter().enumerate() {
        let step_number = index + 1;
        debug!(step = step_number, kind = ?step.kind, "Playing step");
        let table = step.table();

        scenario = match step.kind {
            StepKind::Entity => {
                let scenario = scenario.with_entity_table(&table);
                let context = scenario.entity().ok_or(NgsiQaError::MissingContext {
                    step: step_number,
                    kind: "entity",
                })?;
                write_entities(out, context, step.mode, step.raw)?;
                if let Some(client) = client {
                    report(&client.create_entities(context, step.mode, step.raw)?);
                }
                scenario
            }
            StepKind::Subscription => {
                let scenario = scenario.with_subscription_table(&table);
                let context = scenario.subscription().ok_or(NgsiQaError::MissingContext {
                    step: step_number,
                    kind: "subscription",
                })?;
                write_subscription(out, context, step.raw)?;
                if let Some(client) = client {
                    report(&[client.create_subscription(context, step.raw)?]);
                }
                scenario
            }
        };
    }

    Ok(scenario)
}
