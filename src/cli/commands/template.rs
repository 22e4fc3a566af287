use std::path::Path;

use invitation_core::{
    detect_active_sections, detect_section_variants, fields_for_sections, EditorSession,
};
use invitation_domain::TemplateDefinition;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::commands::CommandEntry;
use crate::utils::templates::{demo_template, load_raw_data, load_template};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "new",
            "Start a session on the built-in demo template",
            "new",
            cmd_new,
        ),
        CommandEntry::new(
            "load-template",
            "Start a session on a template JSON file, optionally seeded with saved data",
            "load-template <template.json> [data.json]",
            cmd_load_template,
        ),
        CommandEntry::new(
            "sections",
            "List the active sections and their component variants",
            "sections",
            cmd_sections,
        ),
    ]
}

fn cmd_new(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let template = demo_template();
    let session = EditorSession::for_template(&template);
    announce(&template, &session);
    context.start_session(template, session);
    Ok(())
}

fn cmd_load_template(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (template_path, data_path) = match args {
        [template] => (*template, None),
        [template, data] => (*template, Some(*data)),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: load-template <template.json> [data.json]".into(),
            ))
        }
    };

    let template = load_template(Path::new(template_path))?;
    let session = match data_path {
        Some(path) => {
            let initial = load_raw_data(Path::new(path))?;
            let sections =
                detect_active_sections(&template.sections_config, &template.metadata);
            let fields = fields_for_sections(&sections);
            EditorSession::initialize(fields, &template, Some(&initial))
        }
        None => EditorSession::for_template(&template),
    };
    announce(&template, &session);
    if !session.touched().is_empty() {
        output::info(format!(
            "{} field(s) imported from saved data.",
            session.touched().len()
        ));
    }
    context.start_session(template, session);
    Ok(())
}

fn cmd_sections(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let session = context.session()?;
    let variants = context
        .template
        .as_ref()
        .map(|template| detect_section_variants(&template.sections_config))
        .unwrap_or_default();

    output::section("Sections");
    for section in session.active_sections() {
        let variant = variants
            .get(section)
            .cloned()
            .unwrap_or_else(|| section.default_variant());
        output::info(format!("  {:<10} {}", section.as_str(), variant));
    }
    Ok(())
}

fn announce(template: &TemplateDefinition, session: &EditorSession) {
    output::success(format!(
        "Session started for template `{}` ({} sections, {} fields).",
        template.id,
        session.active_sections().len(),
        session.fields().len()
    ));
}
