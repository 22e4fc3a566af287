//! Template default extraction.
//!
//! Every field resolves through the same ordered lookup plan:
//! authored template props, raw template data, template-supplied component
//! defaults, built-in component defaults, and finally the kind's empty value.
//! Scalars take the first non-blank hit; collections combine the hits element
//! by element.

use std::collections::BTreeMap;

use tracing::debug;

use invitation_domain::{
    FieldDefinition, FieldKind, FieldValue, GalleryImage, RawData, SectionId, SectionVariant,
    StoryMoment, TemplateDefaults, TemplateDefinition,
};

use crate::{
    catalog::FieldCatalog,
    component_defaults::builtin_default,
    legacy::{self, MAX_GALLERY_IMAGES, MAX_STORY_MOMENTS},
    sections::detect_section_variants,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    TemplateProp(SectionId),
    TemplateData,
    ComponentOverride(SectionId),
    BuiltinComponent(SectionId),
}

/// Normalized view over everything a template offers as default values.
#[derive(Debug, Clone)]
pub struct DefaultSources<'a> {
    catalog: &'a FieldCatalog,
    variants: BTreeMap<SectionId, SectionVariant>,
    template_props: BTreeMap<SectionId, RawData>,
    template_data: RawData,
    component_overrides: BTreeMap<SectionVariant, RawData>,
}

impl<'a> DefaultSources<'a> {
    pub fn new(catalog: &'a FieldCatalog, template: &TemplateDefinition) -> Self {
        let template_props = template
            .template_props
            .iter()
            .filter_map(|(name, props)| {
                SectionId::from_name(name).map(|section| (section, legacy::normalize(props)))
            })
            .collect();
        let component_overrides = template
            .component_defaults
            .iter()
            .map(|(variant, values)| {
                (
                    SectionVariant::new(variant.as_str()),
                    legacy::normalize(values),
                )
            })
            .collect();

        Self {
            catalog,
            variants: detect_section_variants(&template.sections_config),
            template_props,
            template_data: legacy::normalize(&template.template_data),
            component_overrides,
        }
    }

    pub fn variant(&self, section: SectionId) -> SectionVariant {
        self.variants
            .get(&section)
            .cloned()
            .unwrap_or_else(|| section.default_variant())
    }

    fn plan(&self, definition: &FieldDefinition) -> Vec<Lookup> {
        let mut sections = self.catalog.sections_for_field(&definition.key);
        if sections.is_empty() {
            sections.push(definition.section);
        }
        let mut plan: Vec<Lookup> = sections.iter().map(|s| Lookup::TemplateProp(*s)).collect();
        plan.push(Lookup::TemplateData);
        plan.extend(sections.iter().map(|s| Lookup::ComponentOverride(*s)));
        plan.extend(sections.iter().map(|s| Lookup::BuiltinComponent(*s)));
        plan
    }

    fn lookup(&self, step: Lookup, definition: &FieldDefinition) -> Option<FieldValue> {
        let key = definition.key.as_str();
        let kind = definition.kind;
        match step {
            Lookup::TemplateProp(section) => self
                .template_props
                .get(&section)
                .and_then(|props| props.get(key))
                .and_then(|value| FieldValue::from_json(kind, value)),
            Lookup::TemplateData => self
                .template_data
                .get(key)
                .and_then(|value| FieldValue::from_json(kind, value)),
            Lookup::ComponentOverride(section) => self
                .component_overrides
                .get(&self.variant(section))
                .and_then(|values| values.get(key))
                .and_then(|value| FieldValue::from_json(kind, value)),
            Lookup::BuiltinComponent(section) => {
                builtin_default(section, &self.variant(section), key)
                    .cloned()
                    .map(|value| value.coerce(kind))
            }
        }
    }

    /// Resolves the default for a single field.
    pub fn resolve(&self, definition: &FieldDefinition) -> FieldValue {
        let candidates = self
            .plan(definition)
            .into_iter()
            .filter_map(|step| self.lookup(step, definition));

        match definition.kind {
            FieldKind::Gallery => {
                let layers: Vec<Vec<GalleryImage>> = candidates
                    .filter_map(|value| value.as_gallery().map(<[GalleryImage]>::to_vec))
                    .collect();
                FieldValue::Gallery(combine_elements(
                    &layers,
                    GalleryImage::is_empty,
                    MAX_GALLERY_IMAGES,
                ))
            }
            FieldKind::StoryMoments => {
                let layers: Vec<Vec<StoryMoment>> = candidates
                    .filter_map(|value| value.as_moments().map(<[StoryMoment]>::to_vec))
                    .collect();
                FieldValue::Moments(combine_elements(
                    &layers,
                    StoryMoment::is_empty,
                    MAX_STORY_MOMENTS,
                ))
            }
            _ => candidates
                .into_iter()
                .find(|value| !value.is_blank())
                .unwrap_or_else(|| definition.empty_value()),
        }
    }
}

/// Computes the template defaults for `fields`.
///
/// Pure: identical inputs always produce an identical map.
pub fn extract_defaults(
    fields: &[FieldDefinition],
    sources: &DefaultSources<'_>,
) -> TemplateDefaults {
    let defaults: TemplateDefaults = fields
        .iter()
        .map(|definition| (definition.key.clone(), sources.resolve(definition)))
        .collect();
    debug!(fields = defaults.len(), "extracted template defaults");
    defaults
}

/// Index `i` takes the first non-empty element `i` across `layers`.
fn combine_elements<T: Clone + Default>(
    layers: &[Vec<T>],
    is_empty: fn(&T) -> bool,
    limit: usize,
) -> Vec<T> {
    let len = layers.iter().map(Vec::len).max().unwrap_or(0).min(limit);
    let mut combined: Vec<T> = (0..len)
        .map(|index| {
            layers
                .iter()
                .filter_map(|layer| layer.get(index))
                .find(|item| !is_empty(item))
                .cloned()
                .unwrap_or_default()
        })
        .collect();
    while combined.last().is_some_and(is_empty) {
        combined.pop();
    }
    combined
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::catalog::fields_for_sections;

    fn template() -> TemplateDefinition {
        let mut template = TemplateDefinition::new("tpl-olivos", "Olivos")
            .with_section("hero")
            .with_section("gallery_2")
            .with_section("story")
            .with_prop("hero", "groom_name", "Diego")
            .with_prop("hero", "location", "   ")
            .with_prop(
                "story",
                "story_moments",
                json!([{"title": "Primera cita"}]),
            );
        template
            .template_data
            .insert("gallery_image_2_url".into(), json!("/tpl/2.jpg"));
        template
            .template_data
            .insert("gallery_image_2_alt".into(), json!("Plantilla"));
        template.component_defaults.insert(
            "gallery_2".into(),
            json!({"gallery_title": "Recuerdos"})
                .as_object()
                .cloned()
                .unwrap_or_default(),
        );
        template
    }

    fn defaults() -> TemplateDefaults {
        let template = template();
        let sources = DefaultSources::new(FieldCatalog::builtin(), &template);
        let fields =
            fields_for_sections(&[SectionId::Hero, SectionId::Gallery, SectionId::Story]);
        extract_defaults(&fields, &sources)
    }

    #[test]
    fn template_props_win_over_component_defaults() {
        let defaults = defaults();
        assert_eq!(defaults["groom_name"], FieldValue::text("Diego"));
        assert_eq!(defaults["bride_name"], FieldValue::text("María"));
    }

    #[test]
    fn blank_template_values_fall_through() {
        assert_eq!(
            defaults()["location"],
            FieldValue::text("Hacienda Los Olivos, Lima")
        );
    }

    #[test]
    fn template_component_overrides_shadow_builtins() {
        assert_eq!(defaults()["gallery_title"], FieldValue::text("Recuerdos"));
    }

    #[test]
    fn collections_resolve_element_by_element() {
        let defaults = defaults();
        let images = defaults["gallery_images"].as_gallery().expect("gallery");
        assert_eq!(images.len(), 6);
        assert_eq!(images[0].url, "/images/templates/gallery-1.jpg");
        assert_eq!(images[1], GalleryImage::new("/tpl/2.jpg", "Plantilla", ""));

        let moments = defaults["story_moments"].as_moments().expect("moments");
        assert_eq!(moments.len(), 3);
        assert_eq!(moments[0].title, "Primera cita");
        assert_eq!(moments[1].title, "Primer viaje");
    }

    #[test]
    fn extraction_is_deterministic() {
        assert_eq!(defaults(), defaults());
    }

    #[test]
    fn unknown_fields_resolve_to_empty_values() {
        let template = TemplateDefinition::default();
        let sources = DefaultSources::new(FieldCatalog::builtin(), &template);
        let custom =
            FieldDefinition::new("rsvp_deadline", SectionId::Footer, "RSVP", FieldKind::Date);
        let toggle =
            FieldDefinition::new("rsvp_enabled", SectionId::Footer, "RSVP", FieldKind::Toggle);
        let defaults = extract_defaults(&[custom, toggle], &sources);
        assert_eq!(defaults["rsvp_deadline"], FieldValue::text(""));
        assert_eq!(defaults["rsvp_enabled"], FieldValue::Toggle(false));
    }

    #[test]
    fn combine_trims_trailing_empty_elements() {
        let layers = vec![vec![
            GalleryImage::new("/a.jpg", "", ""),
            GalleryImage::default(),
        ]];
        let combined = combine_elements(&layers, GalleryImage::is_empty, 12);
        assert_eq!(combined.len(), 1);
    }
}
