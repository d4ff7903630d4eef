#![forbid(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use command::BuildCommand;
use command::BuildContext;
use qa_config::effective_log_level;
use qa_config::set_log_level;
use qa_config::QaConfigLocation;
use qa_config::QaConfigRepository;

mod cli;
mod command;
mod entity;
mod error;
mod scenario;
mod subscription;

fn main() -> anyhow::Result<()> {
    let opt = cli::Opt::parse();

    let config_location = QaConfigLocation::from_custom_root(&opt.config_dir);
    let config = QaConfigRepository::new(config_location)
        .load()
        .with_context(|| format!("failed to load the configuration from {:?}", opt.config_dir))?;
    set_log_level(effective_log_level(opt.debug, config.log_level()?));

    let cmd = opt.ngsi_qa.build_command(BuildContext { config })?;
    let mut stdout = std::io::stdout().lock();
    cmd.execute(&mut stdout)
        .with_context(|| format!("failed to {}", cmd.description()))
}
