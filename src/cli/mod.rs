pub mod commands;
mod core;
pub mod help;
pub mod output;
mod shell;
pub mod shell_context;

pub use self::core::{CommandError, CommandResult};
pub use shell::run_cli;
pub use shell_context::{CliMode, ShellContext};
