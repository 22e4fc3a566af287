//! Detects which sections a template renders.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use invitation_domain::{RawData, SectionId, SectionVariant, TemplateMetadata};

/// Sections rendered when a template configuration yields nothing usable.
pub const FALLBACK_SECTIONS: [SectionId; 6] = [
    SectionId::Hero,
    SectionId::Welcome,
    SectionId::Countdown,
    SectionId::Gallery,
    SectionId::Itinerary,
    SectionId::Footer,
];

/// Returns the active sections in canonical order, each at most once.
///
/// Never returns an empty list: an empty or unrecognizable configuration
/// falls back to [`FALLBACK_SECTIONS`].
pub fn detect_active_sections(
    sections_config: &RawData,
    metadata: &TemplateMetadata,
) -> Vec<SectionId> {
    let mut active: Vec<SectionId> = enabled_entries(sections_config)
        .map(|(section, _)| section)
        .chain(
            metadata
                .features
                .iter()
                .filter_map(|feature| SectionId::from_name(feature)),
        )
        .collect();
    active.sort();
    active.dedup();

    if active.is_empty() {
        debug!(
            keys = sections_config.len(),
            "no sections detected, using fallback layout"
        );
        return FALLBACK_SECTIONS.to_vec();
    }
    active
}

/// Reports the component variant chosen for each configured section.
///
/// A key equal to the section name selects `<section>_1`; a prefixed key such
/// as `gallery_2` selects that variant. When a section is configured twice the
/// last key in map order wins.
pub fn detect_section_variants(sections_config: &RawData) -> BTreeMap<SectionId, SectionVariant> {
    enabled_entries(sections_config).collect()
}

fn enabled_entries(
    sections_config: &RawData,
) -> impl Iterator<Item = (SectionId, SectionVariant)> + '_ {
    sections_config
        .iter()
        .filter(|(_, value)| is_enabled(value))
        .filter_map(|(key, _)| parse_section_key(key))
}

fn parse_section_key(key: &str) -> Option<(SectionId, SectionVariant)> {
    let normalized = key.trim().to_ascii_lowercase();
    if let Some(section) = SectionId::from_name(&normalized) {
        return Some((section, section.default_variant()));
    }
    SectionId::ALL.into_iter().find_map(|section| {
        normalized
            .strip_prefix(section.as_str())
            .and_then(|rest| rest.strip_prefix('_'))
            .filter(|suffix| !suffix.is_empty())
            .map(|_| (section, SectionVariant::new(normalized.as_str())))
    })
}

fn is_enabled(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::String(text) => {
            !matches!(text.trim().to_ascii_lowercase().as_str(), "false" | "off" | "0")
        }
        Value::Number(number) => number.as_f64() != Some(0.0),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn config(value: Value) -> RawData {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn output_follows_canonical_order_not_input_order() {
        let cfg = config(json!({"footer": true, "gallery_2": true, "hero": true}));
        let sections = detect_active_sections(&cfg, &TemplateMetadata::default());
        assert_eq!(
            sections,
            vec![SectionId::Hero, SectionId::Gallery, SectionId::Footer]
        );
    }

    #[test]
    fn duplicates_collapse_to_one_entry() {
        let cfg = config(json!({"gallery": true, "gallery_2": {"columns": 3}}));
        let metadata = TemplateMetadata {
            features: vec!["gallery".into(), "rsvp".into()],
        };
        assert_eq!(
            detect_active_sections(&cfg, &metadata),
            vec![SectionId::Gallery]
        );
    }

    #[test]
    fn empty_input_uses_fallback() {
        let sections = detect_active_sections(&RawData::new(), &TemplateMetadata::default());
        assert_eq!(sections, FALLBACK_SECTIONS.to_vec());
    }

    #[test]
    fn unknown_and_disabled_keys_are_skipped() {
        let cfg = config(json!({"rsvp": true, "video": false, "story": null, "galleryx": true}));
        let sections = detect_active_sections(&cfg, &TemplateMetadata::default());
        assert_eq!(sections, FALLBACK_SECTIONS.to_vec());
    }

    #[test]
    fn zero_flags_disable_sections() {
        let cfg = config(json!({"hero": 1, "video": 0, "story": "0", "gallery_2": 2}));
        let sections = detect_active_sections(&cfg, &TemplateMetadata::default());
        assert_eq!(sections, vec![SectionId::Hero, SectionId::Gallery]);
    }

    #[test]
    fn features_activate_sections() {
        let metadata = TemplateMetadata {
            features: vec!["Countdown".into(), "video".into()],
        };
        let sections = detect_active_sections(&RawData::new(), &metadata);
        assert_eq!(sections, vec![SectionId::Countdown, SectionId::Video]);
    }

    #[test]
    fn variants_come_from_key_suffix() {
        let cfg = config(json!({"hero": true, "gallery_2": true}));
        let variants = detect_section_variants(&cfg);
        assert_eq!(variants[&SectionId::Hero].as_str(), "hero_1");
        assert_eq!(variants[&SectionId::Gallery].as_str(), "gallery_2");
    }
}
