use crate::error::NgsiQaError;
use qa_config::QaConfig;
use std::io::Write;

/// A trait to be implemented by all ngsi-qa sub-commands.
pub trait Command {
    /// Display that command to the user, telling what will be done.
    ///
    /// This description is displayed to the end user in case of an error, to give the context of that error.
    fn description(&self) -> String;

    /// Run this command, writing the produced payloads to `out`.
    fn execute(&self, out: &mut dyn Write) -> Result<(), NgsiQaError>;

    fn into_boxed(self) -> Box<dyn Command>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

pub trait BuildCommand {
    fn build_command(self, context: BuildContext) -> Result<Box<dyn Command>, NgsiQaError>;
}

pub struct BuildContext {
    pub config: QaConfig,
}
