//! Template definitions supplied by the template catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Flat JSON object as delivered by template and persistence collaborators.
pub type RawData = Map<String, Value>;

/// Capabilities advertised by a template.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateMetadata {
    /// Feature flags; entries naming a section activate it.
    pub features: Vec<String>,
}

/// Everything the customizer needs to know about one template.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TemplateDefinition {
    pub id: String,
    pub name: String,
    /// Sparse section switches, e.g. `{"hero": true, "gallery_2": true}`.
    pub sections_config: RawData,
    pub metadata: TemplateMetadata,
    /// Component-level defaults keyed by variant (`gallery_2`) then field key.
    /// Entries here shadow the built-in component defaults.
    pub component_defaults: BTreeMap<String, RawData>,
    /// Authored values keyed by section name then field key.
    pub template_props: BTreeMap<String, RawData>,
    /// Raw flat template data, overlaid by merged values at render time.
    pub template_data: RawData,
}

impl TemplateDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_section(mut self, key: impl Into<String>) -> Self {
        self.sections_config.insert(key.into(), Value::Bool(true));
        self
    }

    pub fn with_prop(
        mut self,
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.template_props
            .entry(section.into())
            .or_default()
            .insert(key.into(), value.into());
        self
    }
}
