use serde_json::Value;

use invitation_core::{filter_by_mode, format::parse_event_date};
use invitation_domain::{FieldKind, FieldMode, FieldValue, MergedTemplateProps};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::commands::{ArgumentKind, CommandEntry};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "fields",
            "List editable fields grouped by section",
            "fields [basic|full]",
            cmd_fields,
        )
        .completing(ArgumentKind::Mode),
        CommandEntry::new(
            "set",
            "Set a field value (collections take a JSON array)",
            "set <field> <value...>",
            cmd_set,
        )
        .completing(ArgumentKind::FieldKey),
        CommandEntry::new(
            "reset",
            "Return a field to its template default",
            "reset <field>",
            cmd_reset,
        )
        .completing(ArgumentKind::FieldKey),
        CommandEntry::new(
            "reset-all",
            "Discard every edit in the session",
            "reset-all",
            cmd_reset_all,
        ),
        CommandEntry::new(
            "state",
            "Show value, default and touched state of a field",
            "state <field>",
            cmd_state,
        )
        .completing(ArgumentKind::FieldKey),
        CommandEntry::new(
            "preview",
            "Show the merged invitation props",
            "preview [json]",
            cmd_preview,
        ),
    ]
}

fn cmd_fields(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mode = match args.first() {
        Some(raw) => raw.parse::<FieldMode>().map_err(|err| {
            CommandError::InvalidArguments(format!("{}; use basic or full.", err))
        })?,
        None => context.config.default_mode,
    };
    let session = context.session()?;

    output::section(format!("Fields ({})", mode.as_str()));
    for (section, fields) in session.fields_by_section() {
        let visible = filter_by_mode(&fields, mode);
        if visible.is_empty() {
            continue;
        }
        output::info(format!("[{}]", section));
        for field in visible {
            let marker = if session.is_touched(&field.key) { "*" } else { " " };
            let value = session
                .get_field_value(&field.key)
                .map(describe_value)
                .unwrap_or_default();
            output::info(format!(
                " {} {:<20} {:<12} {}",
                marker,
                field.key,
                kind_label(field.kind),
                value
            ));
        }
    }
    output::hint("`*` marks fields you have edited.");
    Ok(())
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [key, rest @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: set <field> <value...>".into(),
        ));
    };
    let definition = context.field(key)?;
    let raw = rest.join(" ");
    let value = parse_field_input(definition.kind, &raw).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "`{}` is not a valid {} value.",
            raw,
            kind_label(definition.kind)
        ))
    })?;
    if definition.kind == FieldKind::Date && parse_event_date(&raw).is_none() {
        output::warning("Date not recognized; the invitation will show the fallback text.");
    }

    context.session_mut()?.update_field(key, value);
    output::success(format!("{} updated.", definition.label));
    Ok(())
}

fn cmd_reset(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [key] = args else {
        return Err(CommandError::InvalidArguments("usage: reset <field>".into()));
    };
    let definition = context.field(key)?;
    context.session_mut()?.reset_field(key);
    output::success(format!("{} restored to the template default.", definition.label));
    Ok(())
}

fn cmd_reset_all(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let touched = context.session()?.touched().len();
    if touched > 0 && !context.confirm(&format!("Discard {} edited field(s)?", touched))? {
        output::info("Nothing changed.");
        return Ok(());
    }
    context.session_mut()?.reset_all();
    output::success("All fields restored to the template defaults.");
    Ok(())
}

fn cmd_state(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [key] = args else {
        return Err(CommandError::InvalidArguments("usage: state <field>".into()));
    };
    let definition = context.field(key)?;
    let state = context
        .session()?
        .get_field_state(key)
        .ok_or_else(|| CommandError::Message(format!("No state recorded for `{}`.", key)))?;

    output::section(format!("Field: {}", definition.key));
    output::info(format!("  Label     : {}", definition.label));
    output::info(format!("  Value     : {}", describe_value(&state.value)));
    output::info(format!("  Default   : {}", describe_value(&state.default_value)));
    output::info(format!("  Touched   : {}", yes_no(state.is_touched)));
    output::info(format!("  Modified  : {}", yes_no(state.is_modified)));
    output::info(format!("  Resettable: {}", yes_no(state.can_reset)));
    Ok(())
}

fn cmd_preview(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let props = context.session()?.merged_props_with(&context.formatter());
    match args.first().copied() {
        Some("json") => {
            println!("{}", serde_json::to_string_pretty(&props)?);
            Ok(())
        }
        None => {
            print_summary(context, &props);
            Ok(())
        }
        Some(other) => Err(CommandError::InvalidArguments(format!(
            "Unknown preview format `{}`; use `preview` or `preview json`.",
            other
        ))),
    }
}

fn print_summary(context: &ShellContext, props: &MergedTemplateProps) {
    use invitation_domain::SectionId::*;

    output::section("Preview");
    let sections = context
        .session
        .as_ref()
        .map(|session| session.active_sections().to_vec())
        .unwrap_or_default();
    for section in sections {
        let line = match section {
            Hero => format!(
                "{} | {} | {}",
                props.hero.couple_names, props.hero.event_date, props.hero.location
            ),
            Welcome => format!("{} | {}", props.welcome.title, props.welcome.message),
            Couple => format!(
                "{}: {} & {}",
                props.couple.title, props.couple.groom_name, props.couple.bride_name
            ),
            Countdown => format!("{} | {}", props.countdown.title, props.countdown.target_date),
            Story => format!(
                "{} | {} moment(s)",
                props.story.title,
                props.story.moments.len()
            ),
            Video => format!("{} | {}", props.video.title, props.video.video_url),
            Gallery => format!(
                "{} | {} image(s)",
                props.gallery.title,
                props.gallery.images.len()
            ),
            Itinerary => {
                let events: Vec<String> = props
                    .itinerary
                    .events
                    .iter()
                    .map(|event| format!("{} {}", event.name, event.time))
                    .collect();
                format!("{} | {}", props.itinerary.title, events.join(", "))
            }
            Footer => format!(
                "{} | {} | {}",
                props.footer.couple_names, props.footer.event_date, props.footer.hashtag
            ),
        };
        output::info(format!("  {:<10} {}", section.as_str(), line));
    }
}

/// Reads command-line text as a value of `kind`. Collections expect JSON.
pub(crate) fn parse_field_input(kind: FieldKind, raw: &str) -> Option<FieldValue> {
    if kind.is_collection() {
        let json: Value = serde_json::from_str(raw.trim()).ok()?;
        return FieldValue::from_json(kind, &json);
    }
    FieldValue::from_json(kind, &Value::String(raw.to_string()))
}

fn describe_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Toggle(true) => "on".into(),
        FieldValue::Toggle(false) => "off".into(),
        FieldValue::Text(text) if text.is_empty() => "(empty)".into(),
        FieldValue::Text(text) => format!("\"{}\"", text),
        FieldValue::Moments(moments) => format!("{} moment(s)", moments.len()),
        FieldValue::Gallery(images) => format!("{} image(s)", images.len()),
    }
}

fn kind_label(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Text => "text",
        FieldKind::LongText => "long text",
        FieldKind::Date => "date",
        FieldKind::Time => "time",
        FieldKind::Url => "url",
        FieldKind::Image => "image",
        FieldKind::Toggle => "toggle",
        FieldKind::Gallery => "gallery",
        FieldKind::StoryMoments => "story",
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use invitation_domain::GalleryImage;

    use super::*;

    #[test]
    fn toggles_parse_from_words() {
        assert_eq!(
            parse_field_input(FieldKind::Toggle, "on"),
            Some(FieldValue::Toggle(true))
        );
        assert_eq!(parse_field_input(FieldKind::Toggle, "quizas"), None);
    }

    #[test]
    fn collections_parse_from_json() {
        assert_eq!(
            parse_field_input(FieldKind::Gallery, r#"["/a.jpg", {"url": "/b.jpg"}]"#),
            Some(FieldValue::Gallery(vec![
                GalleryImage::new("/a.jpg", "", ""),
                GalleryImage::new("/b.jpg", "", ""),
            ]))
        );
        assert_eq!(parse_field_input(FieldKind::StoryMoments, "not json"), None);
    }

    #[test]
    fn text_keeps_spacing() {
        assert_eq!(
            parse_field_input(FieldKind::LongText, "Los esperamos  con cariño"),
            Some(FieldValue::text("Los esperamos  con cariño"))
        );
    }
}
