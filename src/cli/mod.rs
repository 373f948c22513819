pub mod commands;
pub mod io;
pub mod output;
pub mod registry;
mod shell;
mod shell_context;

pub use registry::{CommandEntry, CommandRegistry};
pub use shell::run_cli;
pub use shell_context::{CliMode, ShellContext};

use crate::core::services::ServiceError;
use crate::errors::StoreError;

pub type CommandResult = Result<(), CommandError>;

/// Failure of a single command invocation; reported, never fatal.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    Service(#[from] ServiceError),
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// User-facing CLI error wrapper for shell-level failures.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
