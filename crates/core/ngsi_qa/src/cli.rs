use crate::command::BuildCommand;
use crate::command::BuildContext;
use crate::command::Command;
use crate::entity::EntityCommand;
use crate::error::NgsiQaError;
use crate::scenario::ScenarioCommand;
use crate::subscription::SubscriptionCommand;
use ngsi_client::ContextBrokerClient;
use ngsi_payload::AttributeMode;
use ngsi_payload::InvalidAssignment;
use ngsi_payload::StepTable;
use qa_config::DEFAULT_QA_CONFIG_PATH;
use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
#[clap(
    name = clap::crate_name!(),
    version = clap::crate_version!(),
    about = clap::crate_description!(),
    arg_required_else_help = true
)]
pub struct Opt {
    /// Turn-on the debug log level.
    ///
    /// If off only reports ERROR, WARN, and INFO
    /// If on also reports DEBUG
    #[clap(long, global = true)]
    pub debug: bool,

    /// Directory of `qa.toml`
    #[clap(long = "config-dir", default_value = DEFAULT_QA_CONFIG_PATH, global = true)]
    pub config_dir: PathBuf,

    #[clap(subcommand)]
    pub ngsi_qa: NgsiQaOpt,
}

#[derive(clap::Subcommand, Debug)]
pub enum NgsiQaOpt {
    /// Build the payloads creating entities
    ///
    /// Examples:
    ///   ngsi-qa entity --param entities_type=Room --param entities_id=Room1 \
    ///     --param attributes_number=2 --param attributes_name=temp --param attributes_value=20
    ///
    ///   # Keep the value verbatim, here a JSON boolean
    ///   ngsi-qa entity --raw --param entities_id=Room1 --param attributes_name=on --param attributes_value=true
    #[clap(verbatim_doc_comment)]
    Entity {
        /// A `parameter=value` of the step table, repeated for each parameter
        #[clap(long = "param")]
        #[arg(value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// Attributes as bare values, sent with `options=keyValues`
        #[clap(long)]
        key_values: bool,

        /// Keep the values of the table verbatim
        #[clap(long)]
        raw: bool,

        /// Send the payloads to the context broker
        #[clap(long)]
        send: bool,
    },

    /// Build the payload creating a subscription
    ///
    /// Examples:
    ///   ngsi-qa subscription --param subject_idPattern='.*' \
    ///     --param notification_http_url=http://localhost:1234 --param notification_attrs='array is empty'
    #[clap(verbatim_doc_comment)]
    Subscription {
        /// A `parameter=value` of the step table, repeated for each parameter
        #[clap(long = "param")]
        #[arg(value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// Keep the values of the table verbatim
        #[clap(long)]
        raw: bool,

        /// Send the payload to the context broker
        #[clap(long)]
        send: bool,
    },

    /// Play the steps of a scenario file in order
    Scenario {
        /// TOML file with `[[step]]` tables
        file: PathBuf,

        /// Send the payloads to the context broker
        #[clap(long)]
        send: bool,
    },
}

fn parse_param(assignment: &str) -> Result<(String, String), InvalidAssignment> {
    StepTable::parse_assignment(assignment)
}

fn client(context: &BuildContext, send: bool) -> Result<Option<ContextBrokerClient>, NgsiQaError> {
    if send {
        Ok(Some(ContextBrokerClient::try_new(&context.config)?))
    } else {
        Ok(None)
    }
}

impl BuildCommand for NgsiQaOpt {
    fn build_command(self, context: BuildContext) -> Result<Box<dyn Command>, NgsiQaError> {
        let cmd = match self {
            NgsiQaOpt::Entity {
                params,
                key_values,
                raw,
                send,
            } => EntityCommand {
                table: params.into_iter().collect(),
                mode: if key_values {
                    AttributeMode::KeyValues
                } else {
                    AttributeMode::Normalized
                },
                raw,
                client: client(&context, send)?,
            }
            .into_boxed(),
            NgsiQaOpt::Subscription { params, raw, send } => SubscriptionCommand {
                table: params.into_iter().collect(),
                raw,
                client: client(&context, send)?,
            }
            .into_boxed(),
            NgsiQaOpt::Scenario { file, send } => ScenarioCommand {
                path: file,
                client: client(&context, send)?,
            }
            .into_boxed(),
        };
        Ok(cmd)
    }
}
