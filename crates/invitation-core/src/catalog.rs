//! Static field catalog: which data fields exist and which sections read them.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use once_cell::sync::Lazy;

use invitation_domain::{FieldDefinition, FieldKind, FieldMode, SectionId};

use crate::CatalogError;

static BUILTIN_CATALOG: Lazy<FieldCatalog> = Lazy::new(|| {
    FieldCatalog::new(builtin_definitions(), builtin_section_fields())
        .expect("built-in field catalog is consistent")
});

/// Validated set of field definitions plus the section -> field key table.
#[derive(Debug, Clone)]
pub struct FieldCatalog {
    definitions: Vec<FieldDefinition>,
    index: HashMap<String, usize>,
    section_fields: BTreeMap<SectionId, Vec<String>>,
}

impl FieldCatalog {
    /// Builds a catalog, rejecting duplicate keys, section entries that point at
    /// undefined fields, and definitions missing from their owning section.
    pub fn new(
        definitions: Vec<FieldDefinition>,
        section_fields: Vec<(SectionId, Vec<&str>)>,
    ) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(definitions.len());
        for (position, definition) in definitions.iter().enumerate() {
            if index.insert(definition.key.clone(), position).is_some() {
                return Err(CatalogError::DuplicateField(definition.key.clone()));
            }
        }

        let mut table: BTreeMap<SectionId, Vec<String>> = BTreeMap::new();
        for (section, keys) in section_fields {
            let entry = table.entry(section).or_default();
            for key in keys {
                if !index.contains_key(key) {
                    return Err(CatalogError::UndefinedSectionField {
                        section,
                        key: key.to_string(),
                    });
                }
                if !entry.iter().any(|existing| existing == key) {
                    entry.push(key.to_string());
                }
            }
        }

        for definition in &definitions {
            let listed = table
                .get(&definition.section)
                .is_some_and(|keys| keys.contains(&definition.key));
            if !listed {
                return Err(CatalogError::UnlistedOwner {
                    key: definition.key.clone(),
                    owner: definition.section,
                });
            }
        }

        Ok(Self {
            definitions,
            index,
            section_fields: table,
        })
    }

    /// The catalog shipped with the customizer, validated on first use.
    pub fn builtin() -> &'static FieldCatalog {
        &BUILTIN_CATALOG
    }

    pub fn definitions(&self) -> &[FieldDefinition] {
        &self.definitions
    }

    pub fn definition(&self, key: &str) -> Option<&FieldDefinition> {
        self.index.get(key).map(|&position| &self.definitions[position])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn section_keys(&self, section: SectionId) -> &[String] {
        self.section_fields
            .get(&section)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sections reading `key`: the owning section first, then the others in
    /// canonical order.
    pub fn sections_for_field(&self, key: &str) -> Vec<SectionId> {
        let Some(definition) = self.definition(key) else {
            return Vec::new();
        };
        let mut sections = vec![definition.section];
        sections.extend(
            self.section_fields
                .iter()
                .filter(|(section, keys)| {
                    **section != definition.section && keys.iter().any(|k| k == key)
                })
                .map(|(section, _)| *section),
        );
        sections
    }

    /// Union of the fields required by `sections`, one entry per key, in
    /// canonical section order. Sections without catalog entries are skipped.
    pub fn fields_for_sections(&self, sections: &[SectionId]) -> Vec<FieldDefinition> {
        let mut seen = BTreeSet::new();
        let mut fields = Vec::new();
        for section in canonical(sections) {
            for key in self.section_keys(section) {
                if seen.insert(key.as_str()) {
                    if let Some(definition) = self.definition(key) {
                        fields.push(definition.clone());
                    }
                }
            }
        }
        fields
    }

    /// Groups `fields` under every requested section that reads them.
    /// Shared keys appear under each such section; empty groups are omitted.
    pub fn fields_by_section(
        &self,
        fields: &[FieldDefinition],
        sections: &[SectionId],
    ) -> BTreeMap<SectionId, Vec<FieldDefinition>> {
        let mut grouped = BTreeMap::new();
        for section in canonical(sections) {
            let group: Vec<FieldDefinition> = self
                .section_keys(section)
                .iter()
                .filter_map(|key| fields.iter().find(|field| &field.key == key))
                .cloned()
                .collect();
            if !group.is_empty() {
                grouped.insert(section, group);
            }
        }
        grouped
    }
}

/// Looks up fields for `sections` in the built-in catalog.
pub fn fields_for_sections(sections: &[SectionId]) -> Vec<FieldDefinition> {
    FieldCatalog::builtin().fields_for_sections(sections)
}

/// Groups `fields` per section using the built-in catalog.
pub fn fields_by_section(
    fields: &[FieldDefinition],
    sections: &[SectionId],
) -> BTreeMap<SectionId, Vec<FieldDefinition>> {
    FieldCatalog::builtin().fields_by_section(fields, sections)
}

/// Narrows `fields` to what the given editing mode shows.
pub fn filter_by_mode(fields: &[FieldDefinition], mode: FieldMode) -> Vec<FieldDefinition> {
    match mode {
        FieldMode::Full => fields.to_vec(),
        FieldMode::Basic => fields.iter().filter(|f| f.is_basic()).cloned().collect(),
    }
}

fn canonical(sections: &[SectionId]) -> Vec<SectionId> {
    let mut ordered = sections.to_vec();
    ordered.sort();
    ordered.dedup();
    ordered
}

fn builtin_definitions() -> Vec<FieldDefinition> {
    use FieldKind as K;
    use SectionId::*;

    vec![
        // hero
        FieldDefinition::new("groom_name", Hero, "Nombre del novio", K::Text)
            .with_placeholder("Ej. Juan")
            .basic(),
        FieldDefinition::new("bride_name", Hero, "Nombre de la novia", K::Text)
            .with_placeholder("Ej. Ana")
            .basic(),
        FieldDefinition::new("weddingDate", Hero, "Fecha y hora del evento", K::Date)
            .with_placeholder("2025-06-14T17:00")
            .basic(),
        FieldDefinition::new("location", Hero, "Lugar del evento", K::Text)
            .with_placeholder("Ej. Hacienda Los Olivos, Lima")
            .basic(),
        FieldDefinition::new("heroImageUrl", Hero, "Imagen principal", K::Image)
            .with_placeholder("https://"),
        // welcome
        FieldDefinition::new("welcome_title", Welcome, "Título de bienvenida", K::Text),
        FieldDefinition::new("welcome_message", Welcome, "Mensaje de bienvenida", K::LongText)
            .with_placeholder("Escribe unas palabras para tus invitados")
            .basic(),
        // couple
        FieldDefinition::new("couple_title", Couple, "Título de la sección", K::Text),
        FieldDefinition::new("groom_description", Couple, "Sobre el novio", K::LongText),
        FieldDefinition::new("groom_photo", Couple, "Foto del novio", K::Image),
        FieldDefinition::new("bride_description", Couple, "Sobre la novia", K::LongText),
        FieldDefinition::new("bride_photo", Couple, "Foto de la novia", K::Image),
        // countdown
        FieldDefinition::new(
            "countdown_title",
            Countdown,
            "Título de la cuenta regresiva",
            K::Text,
        ),
        FieldDefinition::new("countdown_image", Countdown, "Imagen de fondo", K::Image),
        // story
        FieldDefinition::new("story_title", Story, "Título de la historia", K::Text),
        FieldDefinition::new("story_moments", Story, "Momentos de la historia", K::StoryMoments),
        // video
        FieldDefinition::new("video_title", Video, "Título del video", K::Text),
        FieldDefinition::new("video_url", Video, "Enlace del video", K::Url)
            .with_placeholder("https://youtube.com/..."),
        // gallery
        FieldDefinition::new("gallery_title", Gallery, "Título de la galería", K::Text),
        FieldDefinition::new("gallery_images", Gallery, "Fotos de la galería", K::Gallery).basic(),
        // itinerary
        FieldDefinition::new("itinerary_title", Itinerary, "Título del itinerario", K::Text),
        FieldDefinition::new("ceremony_enabled", Itinerary, "Mostrar ceremonia", K::Toggle).basic(),
        FieldDefinition::new("ceremony_time", Itinerary, "Hora de la ceremonia", K::Time)
            .with_placeholder("16:00")
            .basic(),
        FieldDefinition::new("ceremony_location", Itinerary, "Lugar de la ceremonia", K::Text)
            .basic(),
        FieldDefinition::new("reception_enabled", Itinerary, "Mostrar recepción", K::Toggle)
            .basic(),
        FieldDefinition::new("reception_time", Itinerary, "Hora de la recepción", K::Time)
            .with_placeholder("19:00")
            .basic(),
        FieldDefinition::new("reception_location", Itinerary, "Lugar de la recepción", K::Text)
            .basic(),
        FieldDefinition::new("party_enabled", Itinerary, "Mostrar fiesta", K::Toggle),
        FieldDefinition::new("party_time", Itinerary, "Hora de la fiesta", K::Time),
        FieldDefinition::new("party_location", Itinerary, "Lugar de la fiesta", K::Text),
        // footer
        FieldDefinition::new("footer_message", Footer, "Mensaje de despedida", K::LongText),
        FieldDefinition::new("footer_hashtag", Footer, "Hashtag", K::Text)
            .with_placeholder("#JuanYAna"),
    ]
}

fn builtin_section_fields() -> Vec<(SectionId, Vec<&'static str>)> {
    use SectionId::*;

    vec![
        (
            Hero,
            vec!["groom_name", "bride_name", "weddingDate", "location", "heroImageUrl"],
        ),
        (Welcome, vec!["welcome_title", "welcome_message"]),
        (
            Couple,
            vec![
                "couple_title",
                "groom_name",
                "groom_description",
                "groom_photo",
                "bride_name",
                "bride_description",
                "bride_photo",
            ],
        ),
        (Countdown, vec!["countdown_title", "weddingDate", "countdown_image"]),
        (Story, vec!["story_title", "story_moments"]),
        (Video, vec!["video_title", "video_url"]),
        (Gallery, vec!["gallery_title", "gallery_images"]),
        (
            Itinerary,
            vec![
                "itinerary_title",
                "ceremony_enabled",
                "ceremony_time",
                "ceremony_location",
                "reception_enabled",
                "reception_time",
                "reception_location",
                "party_enabled",
                "party_time",
                "party_location",
            ],
        ),
        (
            Footer,
            vec![
                "groom_name",
                "bride_name",
                "weddingDate",
                "footer_message",
                "footer_hashtag",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_consistent() {
        let catalog = FieldCatalog::new(builtin_definitions(), builtin_section_fields());
        assert!(catalog.is_ok());
    }

    #[test]
    fn every_basic_field_is_reachable_from_a_section() {
        let catalog = FieldCatalog::builtin();
        let all = catalog.fields_for_sections(&SectionId::ALL);
        for basic in filter_by_mode(catalog.definitions(), FieldMode::Basic) {
            assert!(all.iter().any(|f| f.key == basic.key), "{}", basic.key);
        }
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let definitions = vec![
            FieldDefinition::new("title", SectionId::Hero, "A", FieldKind::Text),
            FieldDefinition::new("title", SectionId::Footer, "B", FieldKind::Text),
        ];
        let err = FieldCatalog::new(definitions, vec![(SectionId::Hero, vec!["title"])])
            .expect_err("duplicate");
        assert_eq!(err, CatalogError::DuplicateField("title".into()));
    }

    #[test]
    fn section_entries_must_reference_defined_fields() {
        let definitions = vec![FieldDefinition::new(
            "title",
            SectionId::Hero,
            "A",
            FieldKind::Text,
        )];
        let err = FieldCatalog::new(
            definitions,
            vec![(SectionId::Hero, vec!["title", "subtitle"])],
        )
        .expect_err("undefined");
        assert!(matches!(err, CatalogError::UndefinedSectionField { .. }));
    }

    #[test]
    fn owners_must_list_their_fields() {
        let definitions = vec![FieldDefinition::new(
            "title",
            SectionId::Hero,
            "A",
            FieldKind::Text,
        )
        .basic()];
        let err = FieldCatalog::new(definitions, vec![(SectionId::Footer, vec!["title"])])
            .expect_err("unlisted");
        assert!(matches!(err, CatalogError::UnlistedOwner { .. }));
    }

    #[test]
    fn shared_fields_appear_once_in_canonical_order() {
        let fields = fields_for_sections(&[SectionId::Footer, SectionId::Hero]);
        let keys: Vec<&str> = fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "groom_name",
                "bride_name",
                "weddingDate",
                "location",
                "heroImageUrl",
                "footer_message",
                "footer_hashtag",
            ]
        );
    }

    #[test]
    fn grouping_repeats_shared_fields_per_section() {
        let sections = [SectionId::Hero, SectionId::Footer];
        let fields = fields_for_sections(&sections);
        let grouped = fields_by_section(&fields, &sections);
        let order: Vec<SectionId> = grouped.keys().copied().collect();
        assert_eq!(order, vec![SectionId::Hero, SectionId::Footer]);
        assert!(grouped[&SectionId::Footer]
            .iter()
            .any(|f| f.key == "groom_name"));
    }

    #[test]
    fn basic_mode_hides_advanced_fields() {
        let fields = fields_for_sections(&[SectionId::Hero]);
        let basic = filter_by_mode(&fields, FieldMode::Basic);
        assert!(basic.iter().all(|f| f.key != "heroImageUrl"));
        assert_eq!(filter_by_mode(&fields, FieldMode::Full).len(), fields.len());
    }

    #[test]
    fn shared_field_lists_owner_first() {
        let sections = FieldCatalog::builtin().sections_for_field("weddingDate");
        assert_eq!(
            sections,
            vec![SectionId::Hero, SectionId::Countdown, SectionId::Footer]
        );
    }
}
