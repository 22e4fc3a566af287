//! Progressive override store for one editing session.
//!
//! Values the user explicitly sets are tracked in a touched set; everything
//! else keeps following the template defaults. Only touched fields survive
//! into [`ProgressiveData`].

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info, trace, warn};
use uuid::Uuid;

use invitation_domain::{
    FieldDefinition, FieldMode, FieldState, FieldValue, MergedTemplateProps, ProgressiveData,
    RawData, SectionId, TemplateDefaults, TemplateDefinition,
};

use crate::{
    catalog::{filter_by_mode, FieldCatalog},
    defaults::{extract_defaults, DefaultSources},
    format::{DateFormatter, LocaleDateFormatter},
    legacy,
    merge::{merge_and_transform_with, merge_flat, MergeInput},
    sections::detect_active_sections,
};

#[derive(Debug, Clone)]
pub struct EditorSession {
    id: Uuid,
    template_id: String,
    catalog: FieldCatalog,
    sections: Vec<SectionId>,
    fields: Vec<FieldDefinition>,
    values: BTreeMap<String, FieldValue>,
    touched: BTreeSet<String>,
    defaults: TemplateDefaults,
    template_data: RawData,
}

impl EditorSession {
    /// Starts a session over `fields` using the built-in catalog.
    ///
    /// Initial values that differ from the template default are seeded as
    /// touched; everything else starts untouched with the kind's empty value.
    pub fn initialize(
        fields: Vec<FieldDefinition>,
        template: &TemplateDefinition,
        initial_data: Option<&RawData>,
    ) -> Self {
        Self::initialize_with(FieldCatalog::builtin(), fields, template, initial_data)
    }

    pub fn initialize_with(
        catalog: &FieldCatalog,
        fields: Vec<FieldDefinition>,
        template: &TemplateDefinition,
        initial_data: Option<&RawData>,
    ) -> Self {
        let mut session = Self::empty(catalog, fields, template);
        let initial = initial_data.map(legacy::normalize).unwrap_or_default();

        for definition in &session.fields {
            let key = definition.key.clone();
            let default = session
                .defaults
                .get(&key)
                .cloned()
                .unwrap_or_else(|| definition.empty_value());
            let seeded = initial
                .get(&key)
                .and_then(|raw| FieldValue::from_json(definition.kind, raw))
                .filter(|value| *value != default);
            match seeded {
                Some(value) => {
                    session.values.insert(key.clone(), value);
                    session.touched.insert(key);
                }
                None => {
                    session.values.insert(key, definition.empty_value());
                }
            }
        }

        info!(
            session = %session.id,
            template = %session.template_id,
            fields = session.fields.len(),
            touched = session.touched.len(),
            "editor session initialized"
        );
        session
    }

    /// Starts a pristine session over every field the template's active
    /// sections need.
    pub fn for_template(template: &TemplateDefinition) -> Self {
        let sections = detect_active_sections(&template.sections_config, &template.metadata);
        let fields = FieldCatalog::builtin().fields_for_sections(&sections);
        Self::initialize(fields, template, None)
    }

    /// Rebuilds a session from persisted progressive data.
    ///
    /// Defaults are recomputed from the current template so template changes
    /// reach untouched fields; saved defaults only fill keys the template no
    /// longer resolves.
    pub fn restore(
        fields: Vec<FieldDefinition>,
        template: &TemplateDefinition,
        data: &ProgressiveData,
    ) -> Self {
        let mut session = Self::empty(FieldCatalog::builtin(), fields, template);
        if !data.template_id.is_empty() && data.template_id != session.template_id {
            warn!(
                saved = %data.template_id,
                current = %session.template_id,
                "restoring progressive data saved against another template"
            );
        }

        for (key, value) in &data.defaults {
            session
                .defaults
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        for definition in &session.fields {
            session
                .values
                .insert(definition.key.clone(), definition.empty_value());
        }
        for key in &data.touched {
            let Some(value) = data.overrides.get(key) else {
                warn!(key = %key, "touched field without a saved value, skipping");
                continue;
            };
            let value = match session.definition(key) {
                Some(definition) => value.clone().coerce(definition.kind),
                None => value.clone(),
            };
            session.values.insert(key.clone(), value);
            session.touched.insert(key.clone());
        }

        debug!(
            session = %session.id,
            touched = session.touched.len(),
            "editor session restored"
        );
        session
    }

    fn empty(
        catalog: &FieldCatalog,
        fields: Vec<FieldDefinition>,
        template: &TemplateDefinition,
    ) -> Self {
        let sources = DefaultSources::new(catalog, template);
        let defaults = extract_defaults(&fields, &sources);
        Self {
            id: Uuid::new_v4(),
            template_id: template.id.clone(),
            catalog: catalog.clone(),
            sections: detect_active_sections(&template.sections_config, &template.metadata),
            fields,
            values: BTreeMap::new(),
            touched: BTreeSet::new(),
            defaults,
            template_data: template.template_data.clone(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn defaults(&self) -> &TemplateDefaults {
        &self.defaults
    }

    pub fn touched(&self) -> &BTreeSet<String> {
        &self.touched
    }

    pub fn definition(&self, key: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn is_touched(&self, key: &str) -> bool {
        self.touched.contains(key)
    }

    /// Records an explicit edit. Keys outside the field list are accepted and
    /// persisted but never reach the render props.
    pub fn update_field(&mut self, key: &str, value: FieldValue) {
        let value = match self.definition(key) {
            Some(definition) => value.coerce(definition.kind),
            None => {
                debug!(key, "updating field outside the session field list");
                value
            }
        };
        trace!(key, "field touched");
        self.values.insert(key.to_string(), value);
        self.touched.insert(key.to_string());
    }

    /// Bulk-sets values without marking them touched, e.g. when syncing
    /// previews. Untouched values never override defaults in the merge.
    pub fn update_fields<I, K>(&mut self, partial: I)
    where
        I: IntoIterator<Item = (K, FieldValue)>,
        K: Into<String>,
    {
        for (key, value) in partial {
            let key = key.into();
            let value = match self.definition(&key) {
                Some(definition) => value.coerce(definition.kind),
                None => value,
            };
            self.values.insert(key, value);
        }
    }

    /// Returns `key` to its template default and clears its touched flag.
    pub fn reset_field(&mut self, key: &str) {
        self.touched.remove(key);
        match self.default_for(key) {
            Some(default) => {
                self.values.insert(key.to_string(), default);
            }
            None => {
                self.values.remove(key);
            }
        }
        trace!(key, "field reset");
    }

    pub fn reset_all(&mut self) {
        self.values = self.defaults.clone();
        self.touched.clear();
        debug!(session = %self.id, "all fields reset");
    }

    /// Effective value: the user's value when touched, otherwise the default.
    pub fn get_field_value(&self, key: &str) -> Option<&FieldValue> {
        if self.touched.contains(key) {
            self.values.get(key)
        } else {
            self.defaults.get(key)
        }
    }

    /// Editor-facing state of `key`, or `None` for keys the session knows
    /// nothing about.
    pub fn get_field_state(&self, key: &str) -> Option<FieldState> {
        let is_touched = self.touched.contains(key);
        let default_value = match self.default_for(key) {
            Some(default) => default,
            None if is_touched => self.values.get(key)?.empty_like(),
            None => return None,
        };
        let value = self
            .get_field_value(key)
            .cloned()
            .unwrap_or_else(|| default_value.clone());
        Some(FieldState {
            is_modified: is_touched && value != default_value,
            value,
            is_touched,
            default_value,
            can_reset: is_touched,
        })
    }

    /// Persistence payload: only touched values are stored as overrides.
    pub fn progressive_data(&self) -> ProgressiveData {
        ProgressiveData {
            template_id: self.template_id.clone(),
            overrides: self
                .touched
                .iter()
                .filter_map(|key| self.values.get(key).map(|v| (key.clone(), v.clone())))
                .collect(),
            defaults: self.defaults.clone(),
            touched: self.touched.clone(),
        }
    }

    pub fn merge_input(&self) -> MergeInput<'_> {
        MergeInput {
            fields: &self.fields,
            touched: &self.touched,
            values: &self.values,
            defaults: &self.defaults,
            template_data: &self.template_data,
        }
    }

    pub fn merged_props(&self) -> MergedTemplateProps {
        self.merged_props_with(&LocaleDateFormatter::default())
    }

    pub fn merged_props_with(&self, formatter: &dyn DateFormatter) -> MergedTemplateProps {
        merge_and_transform_with(&self.merge_input(), formatter)
    }

    pub fn merged_data(&self, formatter: &dyn DateFormatter) -> RawData {
        merge_flat(&self.merge_input(), formatter)
    }

    pub fn active_sections(&self) -> &[SectionId] {
        &self.sections
    }

    pub fn fields_in_mode(&self, mode: FieldMode) -> Vec<FieldDefinition> {
        filter_by_mode(&self.fields, mode)
    }

    pub fn fields_by_section(&self) -> BTreeMap<SectionId, Vec<FieldDefinition>> {
        self.catalog.fields_by_section(&self.fields, &self.sections)
    }

    fn default_for(&self, key: &str) -> Option<FieldValue> {
        self.defaults
            .get(key)
            .cloned()
            .or_else(|| self.definition(key).map(FieldDefinition::empty_value))
    }
}
