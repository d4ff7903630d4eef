use crate::command::Command;
use crate::error::NgsiQaError;
use ngsi_client::ContextBrokerClient;
use ngsi_client::HttpResponse;
use ngsi_payload::entity::build_entities;
use ngsi_payload::entity::build_entities_raw;
use ngsi_payload::AttributeMode;
use ngsi_payload::EntityContext;
use ngsi_payload::EntityInput;
use ngsi_payload::StepTable;
use std::io::Write;
use tracing::info;
use tracing::warn;

pub struct EntityCommand {
    pub table: StepTable,
    pub mode: AttributeMode,
    pub raw: bool,
    pub client: Option<ContextBrokerClient>,
}

impl Command for EntityCommand {
    fn description(&self) -> String {
        match self.client {
            Some(_) => "create the entities".into(),
            None => "build the entity payloads".into(),
        }
    }

    fn execute(&self, out: &mut dyn Write) -> Result<(), NgsiQaError> {
        let context = EntityInput::from_table(&self.table).resolve(None);
        write_entities(out, &context, self.mode, self.raw)?;
        if let Some(client) = &self.client {
            report(&client.create_entities(&context, self.mode, self.raw)?);
        }
        Ok(())
    }
}

/// One payload per generated entity, one per line in raw mode, pretty-printed otherwise.
pub fn render_entities(
    context: &EntityContext,
    mode: AttributeMode,
    raw: bool,
) -> Result<Vec<String>, NgsiQaError> {
    if raw {
        Ok(build_entities_raw(context, mode)?)
    } else {
        build_entities(context, mode)
            .iter()
            .map(|entity| Ok(serde_json::to_string_pretty(entity)?))
            .collect()
    }
}

pub fn write_entities(
    out: &mut dyn Write,
    context: &EntityContext,
    mode: AttributeMode,
    raw: bool,
) -> Result<(), NgsiQaError> {
    for payload in render_entities(context, mode, raw)? {
        writeln!(out, "{payload}")?;
    }
    Ok(())
}

pub(crate) fn report(responses: &[HttpResponse]) {
    for response in responses {
        if response.is_success() {
            info!(
                status = response.status,
                location = response.header("location").unwrap_or_default(),
                "Accepted"
            );
        } else {
            warn!(status = response.status, body = %response.body, "Rejected");
        }
    }
}
