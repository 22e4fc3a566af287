use invitation_core::{detect_active_sections, fields_for_sections, EditorSession};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::commands::CommandEntry;
use crate::utils::templates::demo_template;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "save",
            "Save the session's edits under a name",
            "save [name]",
            cmd_save,
        ),
        CommandEntry::new(
            "open",
            "Reopen saved edits against the current template",
            "open <name>",
            cmd_open,
        ),
        CommandEntry::new("sessions", "List saved sessions", "sessions", cmd_sessions),
        CommandEntry::new(
            "backups",
            "List backups kept for a saved session",
            "backups <name>",
            cmd_backups,
        ),
    ]
}

fn cmd_save(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = match (args.first(), &context.session_name) {
        (Some(name), _) => name.to_string(),
        (None, Some(current)) => current.clone(),
        (None, None) => {
            return Err(CommandError::InvalidArguments(
                "usage: save <name> (no name set for this session yet)".into(),
            ))
        }
    };
    let data = context.session()?.progressive_data();
    let path = context.store.save(&name, &data)?;
    context.session_name = Some(name.clone());
    output::success(format!(
        "Session `{}` saved ({} edited field(s)) to {}.",
        name,
        data.touched.len(),
        path.display()
    ));
    Ok(())
}

fn cmd_open(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name] = args else {
        return Err(CommandError::InvalidArguments("usage: open <name>".into()));
    };
    let data = context.store.load(name)?;

    let template = match context.template.take() {
        Some(template) if template.id == data.template_id || data.template_id.is_empty() => {
            template
        }
        Some(template) => {
            output::warning(format!(
                "`{}` was saved for template `{}`; applying it to `{}`.",
                name, data.template_id, template.id
            ));
            template
        }
        None => demo_template(),
    };
    let sections = detect_active_sections(&template.sections_config, &template.metadata);
    let session = EditorSession::restore(fields_for_sections(&sections), &template, &data);
    output::success(format!(
        "Session `{}` opened with {} edited field(s).",
        name,
        session.touched().len()
    ));
    context.start_session(template, session);
    context.session_name = Some(name.to_string());
    Ok(())
}

fn cmd_sessions(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let names = context.store.list()?;
    if names.is_empty() {
        output::info("No saved sessions.");
        return Ok(());
    }
    output::section("Saved sessions");
    for name in names {
        let marker = if context.session_name.as_deref() == Some(name.as_str()) {
            "*"
        } else {
            " "
        };
        output::info(format!(" {} {}", marker, name));
    }
    Ok(())
}

fn cmd_backups(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name] = args else {
        return Err(CommandError::InvalidArguments("usage: backups <name>".into()));
    };
    let backups = context.store.list_backups(name)?;
    if backups.is_empty() {
        output::info(format!("No backups for `{}`.", name));
        return Ok(());
    }
    output::section(format!("Backups: {}", name));
    for backup in backups {
        let when = backup
            .created_at
            .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "unknown time".into());
        output::info(format!("  {:<40} {}", backup.id, when));
    }
    Ok(())
}
