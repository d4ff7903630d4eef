use crate::command::Command;
use crate::entity::report;
use crate::error::NgsiQaError;
use ngsi_client::ContextBrokerClient;
use ngsi_payload::subscription::build_subscription;
use ngsi_payload::subscription::build_subscription_raw;
use ngsi_payload::StepTable;
use ngsi_payload::SubscriptionContext;
use ngsi_payload::SubscriptionInput;
use std::io::Write;

pub struct SubscriptionCommand {
    pub table: StepTable,
    pub raw: bool,
    pub client: Option<ContextBrokerClient>,
}

impl Command for SubscriptionCommand {
    fn description(&self) -> String {
        match self.client {
            Some(_) => "create the subscription".into(),
            None => "build the subscription payload".into(),
        }
    }

    fn execute(&self, out: &mut dyn Write) -> Result<(), NgsiQaError> {
        let context = SubscriptionInput::from_table(&self.table).resolve(None);
        write_subscription(out, &context, self.raw)?;
        if let Some(client) = &self.client {
            report(&[client.create_subscription(&context, self.raw)?]);
        }
        Ok(())
    }
}

pub fn render_subscription(context: &SubscriptionContext, raw: bool) -> Result<String, NgsiQaError> {
    if raw {
        Ok(build_subscription_raw(context)?)
    } else {
        Ok(serde_json::to_string_pretty(&build_subscription(context))?)
    }
}

pub fn write_subscription(
    out: &mut dyn Write,
    context: &SubscriptionContext,
    raw: bool,
) -> Result<(), NgsiQaError> {
    writeln!(out, "{}", render_subscription(context, raw)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ngsi_payload::subscription::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use serde_json::Value;

    #[test]
    fn subscription_payload_is_printed() {
        let command = SubscriptionCommand {
            table: StepTable::new()
                .with(SUBJECT_ID, "Room1")
                .with(NOTIFICATION_HTTP_URL, "http://localhost:1234")
                .with(STATUS, "inactive"),
            raw: false,
            client: None,
        };

        let mut out = Vec::new();
        command.execute(&mut out).unwrap();
        let printed: Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(
            printed,
            json!({
                "subject": {"entities": [{"id": "Room1"}]},
                "notification": {"http": {"url": "http://localhost:1234"}},
                "status": "inactive"
            })
        );
    }

    #[test]
    fn raw_subscription_is_printed_verbatim() {
        let context = SubscriptionInput::from_table(
            &StepTable::new()
                .with(SUBJECT_ID, "\"Room1\"")
                .with(THROTTLING, "\"five\""),
        )
        .resolve(None);

        assert_eq!(
            render_subscription(&context, true).unwrap(),
            r#"{"subject":{"entities":[{"id":"Room1"}]},"throttling":"five"}"#
        );
    }
}
