//! Subcommand handlers
//!
//! Each handler gathers its parameters (flags first, prompts when interactive),
//! validates them and issues its remote calls strictly in sequence. The first
//! error ends the command; `main` reports it and exits with status 1.

pub mod create;
pub mod delete;
pub mod list;

use crate::cli::{Command, CreateCommand, DeleteCommand, ListCommand};
use crate::cloud::CloudError;
use crate::config::ConfigError;
use crate::controlplane::ControlPlaneError;
use crate::interactive::{self, Input, PromptError};
use crate::mode::{Mode, ModeError};
use crate::runtime::Runtime;
use crate::strategies::StrategyError;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CommandError {
    /// Reported as `E: <message>`
    #[error("{0}")]
    Failed(String),

    /// Reported as `W: <message>`
    #[error("{0}")]
    Warning(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Mode(#[from] ModeError),

    #[error(transparent)]
    Strategy(#[from] StrategyError),

    #[error(transparent)]
    ControlPlane(#[from] ControlPlaneError),

    #[error(transparent)]
    Cloud(#[from] CloudError),

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

impl CommandError {
    pub fn is_warning(&self) -> bool {
        matches!(self, CommandError::Warning(_))
    }
}

/// Run the parsed subcommand
pub async fn run(command: Command, rt: &Runtime) -> Result<(), CommandError> {
    debug!(command = ?command, "Running command");
    match command {
        Command::Create(CreateCommand::Ingress(args)) => create::ingress::run(args, rt).await,
        Command::Create(CreateCommand::MachinePool(args)) => {
            create::machinepool::run(args, rt).await
        }
        Command::Delete(DeleteCommand::OidcConfig(args)) => {
            delete::oidc_config::run(args, rt).await
        }
        Command::Delete(DeleteCommand::OidcProvider(args)) => {
            delete::oidc_provider::run(args, rt).await
        }
        Command::Delete(DeleteCommand::Ingress(args)) => delete::ingress::run(args, rt).await,
        Command::Delete(DeleteCommand::MachinePool(args)) => {
            delete::machinepool::run(args, rt).await
        }
        Command::List(ListCommand::Clusters(args)) => list::clusters(args, rt).await,
        Command::List(ListCommand::Ingresses(args)) => list::ingresses(args, rt).await,
        Command::List(ListCommand::MachinePools(args)) => list::machine_pools(args, rt).await,
        Command::List(ListCommand::OidcConfigs(args)) => list::oidc_configs(args, rt).await,
    }
}

/// `--mode` flag value, if given
pub(crate) fn parse_mode(flag: Option<&str>) -> Result<Option<Mode>, CommandError> {
    match flag {
        Some(value) => Ok(Some(value.parse()?)),
        None => Ok(None),
    }
}

/// Ask for the operation mode, offering `default` first
pub(crate) fn prompt_mode(
    rt: &Runtime,
    question: &str,
    default: Mode,
) -> Result<Mode, CommandError> {
    let answer = interactive::get_option(
        rt.prompter.as_ref(),
        Input::new(question)
            .help(
                "How to perform the operation. auto: resource changes are applied using the \
                 current AWS account. manual: commands to modify AWS resources are printed.",
            )
            .default_text(default.as_str())
            .options(crate::mode::MODES.iter().map(|m| m.to_string()).collect())
            .required(),
    )
    .map_err(|e| CommandError::Failed(format!("Expected a valid {}: {}", question, e)))?;
    Ok(answer.parse()?)
}

/// Skip the prompt when `yes` is set
pub(crate) fn confirm(rt: &Runtime, yes: bool, question: String) -> Result<bool, CommandError> {
    if yes {
        return Ok(true);
    }
    Ok(interactive::get_bool(
        rt.prompter.as_ref(),
        Input::new(question).default_bool(false),
    )?)
}
