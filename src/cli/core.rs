//! Core CLI dispatch, errors, and shell context helpers.

use std::{io, path::PathBuf};

use dialoguer::{theme::ColorfulTheme, Confirm};
use strsim::levenshtein;
use thiserror::Error;

use invitation_config::{manager::default_base_dir, ConfigError, ConfigManager};
use invitation_core::{EditorSession, LocaleDateFormatter};
use invitation_domain::{FieldDefinition, TemplateDefinition};
use invitation_storage_json::{JsonSessionStore, StorageError};

use super::commands::CommandTable;
use super::output;
pub use crate::cli::shell_context::{CliMode, ShellContext};
use crate::StudioError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("No session open. Use `new`, `load-template` or `open` first.")]
    NoSession,
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Studio(#[from] StudioError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

const SUGGESTION_DISTANCE: usize = 3;

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, StudioError> {
        Self::with_base_dir(mode, default_base_dir())
    }

    /// Builds a context whose config and sessions live under `base`.
    pub fn with_base_dir(mode: CliMode, base: PathBuf) -> Result<Self, StudioError> {
        let config_manager = ConfigManager::with_base_dir(base.clone())?;
        let config = config_manager.load()?;
        output::set_color_enabled(config.ui_color_enabled && mode == CliMode::Interactive);
        let store = JsonSessionStore::new(config.resolve_sessions_dir(&base))?;

        Ok(ShellContext {
            mode,
            commands: CommandTable::builtin(),
            base_dir: base,
            config_manager,
            config,
            store,
            template: None,
            session: None,
            session_name: None,
            running: true,
        })
    }

    pub(crate) fn prompt(&self) -> String {
        match (&self.template, &self.session_name) {
            (Some(template), Some(name)) => format!("studio [{}:{}]> ", template.id, name),
            (Some(template), None) => format!("studio [{}]> ", template.id),
            _ => "studio> ".to_string(),
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.commands.find(command).map(|entry| entry.handler) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(command);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = closest(self.commands.names(), input) {
            output::hint(format!("Did you mean `{}`?", best));
        }
    }

    /// Warns about an unknown field key and points at the closest known one.
    pub(crate) fn suggest_field(&self, input: &str) {
        output::warning(format!("Unknown field `{}`.", input));
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let keys = session.fields().iter().map(|field| field.key.as_str());
        if let Some(best) = closest(keys, input) {
            output::hint(format!("Did you mean `{}`?", best));
        }
    }

    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(CommandError::from)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, StudioError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Exit shell?")
            .default(true)
            .interact()
            .map_err(StudioError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), StudioError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::NoSession => {
                output::error(CommandError::NoSession);
                output::hint("Try `new` to start from the demo template.");
                Ok(())
            }
            other => {
                output::error(other);
                Ok(())
            }
        }
    }

    pub(crate) fn session(&self) -> Result<&EditorSession, CommandError> {
        self.session.as_ref().ok_or(CommandError::NoSession)
    }

    pub(crate) fn session_mut(&mut self) -> Result<&mut EditorSession, CommandError> {
        self.session.as_mut().ok_or(CommandError::NoSession)
    }

    /// Looks up `key` in the open session, printing a suggestion when unknown.
    pub(crate) fn field(&self, key: &str) -> Result<FieldDefinition, CommandError> {
        match self.session()?.definition(key) {
            Some(definition) => Ok(definition.clone()),
            None => {
                self.suggest_field(key);
                Err(CommandError::InvalidArguments(format!(
                    "Field `{}` is not part of this template.",
                    key
                )))
            }
        }
    }

    pub(crate) fn start_session(&mut self, template: TemplateDefinition, session: EditorSession) {
        self.template = Some(template);
        self.session = Some(session);
        self.session_name = None;
    }

    /// Date formatter honoring the configured locale and fallback text.
    pub(crate) fn formatter(&self) -> LocaleDateFormatter {
        let formatter = LocaleDateFormatter::for_locale_tag(&self.config.locale);
        match &self.config.date_fallback {
            Some(fallback) => formatter.with_fallback(fallback.as_str()),
            None => formatter,
        }
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        crate::cli::shell::handle_line(self, line)
    }
}

fn closest<'a>(candidates: impl Iterator<Item = &'a str>, input: &str) -> Option<&'a str> {
    let needle = input.to_ascii_lowercase();
    candidates
        .map(|candidate| (levenshtein(&candidate.to_ascii_lowercase(), &needle), candidate))
        .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate)
}
