pub mod config;
pub mod fields;
pub mod session;
pub mod system;
pub mod template;

use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// What the first argument of a command completes to in the line editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    Free,
    Command,
    FieldKey,
    Mode,
}

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub argument: ArgumentKind,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            argument: ArgumentKind::Free,
            handler,
        }
    }

    pub fn completing(mut self, argument: ArgumentKind) -> Self {
        self.argument = argument;
        self
    }
}

/// Shell commands in the order `help` lists them.
pub struct CommandTable {
    entries: Vec<CommandEntry>,
}

impl CommandTable {
    pub fn builtin() -> Self {
        let mut entries: Vec<CommandEntry> = Vec::new();
        for entry in system::definitions()
            .into_iter()
            .chain(template::definitions())
            .chain(fields::definitions())
            .chain(session::definitions())
            .chain(config::definitions())
        {
            if !entries.iter().any(|known| known.name == entry.name) {
                entries.push(entry);
            }
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    /// Case-insensitive lookup by command name.
    pub fn find(&self, name: &str) -> Option<&CommandEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }
}
