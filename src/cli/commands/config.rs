use invitation_config::model::CONFIG_KEYS;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::commands::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show or change editor preferences",
        "config [show | set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            show(context);
            Ok(())
        }
        ["set", key, value @ ..] => {
            context.config.set(key, &value.join(" "))?;
            context.persist_config()?;
            if *key == "ui_color_enabled" {
                output::set_color_enabled(context.config.ui_color_enabled);
            }
            if *key == "sessions_dir" {
                output::hint("The new sessions directory is used after a restart.");
            }
            output::success(format!("Preference `{}` updated.", key));
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(format!(
            "usage: config [show | set <key> <value>] (keys: {})",
            CONFIG_KEYS.join(", ")
        ))),
    }
}

fn show(context: &ShellContext) {
    let config = &context.config;
    output::section("Preferences");
    output::info(format!("  locale           : {}", config.locale));
    output::info(format!("  default_mode     : {}", config.default_mode.as_str()));
    output::info(format!(
        "  date_fallback    : {}",
        config.date_fallback.as_deref().unwrap_or("(locale default)")
    ));
    output::info(format!(
        "  sessions_dir     : {}",
        context.store.sessions_dir().display()
    ));
    output::info(format!("  ui_color_enabled : {}", config.ui_color_enabled));
    output::info(format!("  home             : {}", context.base_dir.display()));
    output::info(format!(
        "  config file      : {}",
        context.config_manager.config_path().display()
    ));
}
