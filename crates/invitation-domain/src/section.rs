//! Section identifiers and layout variants.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Visual blocks an invitation template can stack.
///
/// Declaration order is the canonical stacking order; `Ord` follows it, so any
/// ordered collection keyed by `SectionId` iterates in render order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Hero,
    Welcome,
    Couple,
    Countdown,
    Story,
    Video,
    Gallery,
    Itinerary,
    Footer,
}

impl SectionId {
    /// Every section in canonical order.
    pub const ALL: [SectionId; 9] = [
        SectionId::Hero,
        SectionId::Welcome,
        SectionId::Couple,
        SectionId::Countdown,
        SectionId::Story,
        SectionId::Video,
        SectionId::Gallery,
        SectionId::Itinerary,
        SectionId::Footer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionId::Hero => "hero",
            SectionId::Welcome => "welcome",
            SectionId::Couple => "couple",
            SectionId::Countdown => "countdown",
            SectionId::Story => "story",
            SectionId::Video => "video",
            SectionId::Gallery => "gallery",
            SectionId::Itinerary => "itinerary",
            SectionId::Footer => "footer",
        }
    }

    /// Parses a bare section name, ignoring case and surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase();
        SectionId::ALL
            .into_iter()
            .find(|section| section.as_str() == normalized)
    }

    /// Position of the section in the canonical order.
    pub fn position(self) -> usize {
        self as usize
    }

    pub fn default_variant(self) -> SectionVariant {
        SectionVariant::numbered(self, 1)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names the component variant rendering a section, e.g. `gallery_2`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionVariant(String);

impl SectionVariant {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_ascii_lowercase())
    }

    pub fn numbered(section: SectionId, index: u32) -> Self {
        Self(format!("{}_{}", section.as_str(), index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_canonical_stack() {
        let mut sections = vec![SectionId::Footer, SectionId::Gallery, SectionId::Hero];
        sections.sort();
        assert_eq!(
            sections,
            vec![SectionId::Hero, SectionId::Gallery, SectionId::Footer]
        );
        assert_eq!(SectionId::Countdown.position(), 3);
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!(SectionId::from_name(" Gallery "), Some(SectionId::Gallery));
        assert_eq!(SectionId::from_name("rsvp"), None);
        assert_eq!(SectionId::Story.default_variant().as_str(), "story_1");
    }
}
