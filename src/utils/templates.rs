use std::{fs, path::Path};

use tracing::info;

use invitation_domain::{RawData, TemplateDefinition};

use crate::StudioError;

/// Reads a template definition from a JSON file.
pub fn load_template(path: &Path) -> Result<TemplateDefinition, StudioError> {
    let text = fs::read_to_string(path)?;
    let mut template: TemplateDefinition = serde_json::from_str(&text)?;
    if template.id.trim().is_empty() {
        template.id = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string)
            .ok_or_else(|| StudioError::Template(format!("{} has no id", path.display())))?;
    }
    info!(template = %template.id, path = %path.display(), "template loaded");
    Ok(template)
}

/// Reads a flat data object, e.g. a saved invitation exported elsewhere.
pub fn load_raw_data(path: &Path) -> Result<RawData, StudioError> {
    let text = fs::read_to_string(path)?;
    match serde_json::from_str(&text)? {
        serde_json::Value::Object(map) => Ok(map),
        _ => Err(StudioError::Template(format!(
            "{} does not contain a JSON object",
            path.display()
        ))),
    }
}

/// Template used when no file is loaded: every fallback section with the
/// built-in component defaults.
pub fn demo_template() -> TemplateDefinition {
    TemplateDefinition::new("demo", "Demo")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_without_id_takes_file_stem() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("olivos.json");
        fs::write(&path, r#"{"name": "Olivos", "sectionsConfig": {"hero": true}}"#)
            .expect("write");

        let template = load_template(&path).expect("load");
        assert_eq!(template.id, "olivos");
        assert_eq!(template.name, "Olivos");
        assert!(template.sections_config.contains_key("hero"));
    }

    #[test]
    fn raw_data_must_be_an_object() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data.json");
        fs::write(&path, "[1, 2]").expect("write");
        assert!(matches!(
            load_raw_data(&path),
            Err(StudioError::Template(_))
        ));
    }
}
