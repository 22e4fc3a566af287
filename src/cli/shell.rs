//! Line-oriented shell: rustyline when interactive, plain stdin lines in
//! script mode.

use std::io::{self, BufRead};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};

use invitation_core::FieldCatalog;

use crate::cli::commands::{ArgumentKind, CommandTable};
use crate::cli::core::{CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output;
use crate::StudioError;

/// Set to any value to read commands from stdin without a line editor.
pub const SCRIPT_ENV: &str = "INVITATION_STUDIO_CLI_SCRIPT";

const MODES: [&str; 2] = ["basic", "full"];

pub fn run_cli() -> Result<(), StudioError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), StudioError> {
    let mut editor = Editor::<StudioHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(StudioHelper::new(&context.commands)));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    output::info("Invitation Studio. Type `help` to list commands.");
    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line).ok();
                if !execute(context, line)? {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

/// Runs stdin line by line. Blank lines and `#` comments are skipped.
fn run_script(context: &mut ShellContext) -> Result<(), StudioError> {
    for line in io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if !execute(context, line)? {
            break;
        }
    }
    Ok(())
}

/// Returns `false` once the shell should stop reading lines.
fn execute(context: &mut ShellContext, line: &str) -> Result<bool, StudioError> {
    match handle_line(context, line) {
        Ok(LoopControl::Continue) => Ok(context.running),
        Ok(LoopControl::Exit) => Ok(false),
        Err(err) => {
            context.report_error(err)?;
            Ok(true)
        }
    }
}

pub(crate) fn handle_line(
    context: &mut ShellContext,
    line: &str,
) -> Result<LoopControl, CommandError> {
    let tokens = match shell_words::split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(format!("Could not read `{}`: {}", line.trim(), err));
            return Ok(LoopControl::Continue);
        }
    };
    let Some((command, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();

    let control = context.dispatch(command, &args)?;
    if control == LoopControl::Exit {
        context.running = false;
    }
    Ok(control)
}

/// Completes command names, then the first argument according to the
/// command's [`ArgumentKind`].
struct StudioHelper {
    commands: Vec<(&'static str, ArgumentKind)>,
    field_keys: Vec<String>,
}

impl StudioHelper {
    fn new(commands: &CommandTable) -> Self {
        let mut field_keys: Vec<String> = FieldCatalog::builtin()
            .definitions()
            .iter()
            .map(|field| field.key.clone())
            .collect();
        field_keys.sort();
        Self {
            commands: commands
                .entries()
                .iter()
                .map(|entry| (entry.name, entry.argument))
                .collect(),
            field_keys,
        }
    }

    fn candidates(&self, words: &[&str], needle: &str) -> Vec<String> {
        let pool: Vec<&str> = match words {
            [] => self.commands.iter().map(|(name, _)| *name).collect(),
            [command] => match self.argument_of(command) {
                ArgumentKind::Free => Vec::new(),
                ArgumentKind::Command => self.commands.iter().map(|(name, _)| *name).collect(),
                ArgumentKind::FieldKey => self.field_keys.iter().map(String::as_str).collect(),
                ArgumentKind::Mode => MODES.to_vec(),
            },
            _ => Vec::new(),
        };
        pool.into_iter()
            .filter(|candidate| candidate.starts_with(needle))
            .map(str::to_string)
            .collect()
    }

    fn argument_of(&self, command: &str) -> ArgumentKind {
        self.commands
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(command))
            .map(|(_, argument)| *argument)
            .unwrap_or(ArgumentKind::Free)
    }
}

impl Helper for StudioHelper {}

impl Completer for StudioHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let words: Vec<&str> = prefix[..start].split_whitespace().collect();
        let pairs = self
            .candidates(&words, &prefix[start..])
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for StudioHelper {
    type Hint = String;
}

impl Highlighter for StudioHelper {}

impl Validator for StudioHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(line: &str) -> (usize, Vec<String>) {
        let helper = StudioHelper::new(&CommandTable::builtin());
        let history = DefaultHistory::new();
        let ctx = ReadlineContext::new(&history);
        let (start, pairs) = helper.complete(line, line.len(), &ctx).expect("complete");
        (start, pairs.into_iter().map(|pair| pair.replacement).collect())
    }

    #[test]
    fn command_word_completes_from_the_table() {
        let (start, names) = complete("res");
        assert_eq!(start, 0);
        assert_eq!(names, vec!["reset", "reset-all"]);
    }

    #[test]
    fn field_commands_complete_field_keys() {
        let (start, keys) = complete("set gro");
        assert_eq!(start, 4);
        assert_eq!(keys, vec!["groom_name"]);

        let (_, keys) = complete("state weddingD");
        assert_eq!(keys, vec!["weddingDate"]);
    }

    #[test]
    fn mode_and_help_arguments_complete() {
        assert_eq!(complete("fields b").1, vec!["basic"]);
        assert_eq!(complete("help sav").1, vec!["save"]);
    }

    #[test]
    fn free_and_trailing_arguments_do_not_complete() {
        assert!(complete("save bo").1.is_empty());
        assert!(complete("set groom_name Ju").1.is_empty());
    }
}
