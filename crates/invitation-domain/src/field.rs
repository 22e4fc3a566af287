//! Field definitions exposed by the customizer.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{section::SectionId, value::FieldValue};

/// Editing mode of the customizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldMode {
    /// Simplified editor showing only the essentials.
    #[default]
    Basic,
    /// Every field of every active section.
    Full,
}

/// Text that names no editing mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownFieldMode(pub String);

impl fmt::Display for UnknownFieldMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field mode `{}`", self.0)
    }
}

impl std::error::Error for UnknownFieldMode {}

impl FromStr for FieldMode {
    type Err = UnknownFieldMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "basic" | "basico" | "básico" => Ok(FieldMode::Basic),
            "full" | "completo" | "advanced" => Ok(FieldMode::Full),
            _ => Err(UnknownFieldMode(value.to_string())),
        }
    }
}

impl FieldMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldMode::Basic => "basic",
            FieldMode::Full => "full",
        }
    }
}

/// Shape of the value a field holds; drives input parsing and empty values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    LongText,
    Date,
    Time,
    Url,
    Image,
    Toggle,
    Gallery,
    StoryMoments,
}

impl FieldKind {
    pub fn empty_value(self) -> FieldValue {
        match self {
            FieldKind::Toggle => FieldValue::Toggle(false),
            FieldKind::Gallery => FieldValue::Gallery(Vec::new()),
            FieldKind::StoryMoments => FieldValue::Moments(Vec::new()),
            _ => FieldValue::Text(String::new()),
        }
    }

    pub fn is_collection(self) -> bool {
        matches!(self, FieldKind::Gallery | FieldKind::StoryMoments)
    }
}

/// Describes a single editable data key.
///
/// Keys are global: one definition per key even when several sections read it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub key: String,
    pub section: SectionId,
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
    pub kind: FieldKind,
    #[serde(default = "FieldDefinition::default_mode")]
    pub mode: FieldMode,
}

impl FieldDefinition {
    pub fn new(
        key: impl Into<String>,
        section: SectionId,
        label: impl Into<String>,
        kind: FieldKind,
    ) -> Self {
        Self {
            key: key.into(),
            section,
            label: label.into(),
            placeholder: String::new(),
            kind,
            mode: FieldMode::Full,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn basic(mut self) -> Self {
        self.mode = FieldMode::Basic;
        self
    }

    pub fn is_basic(&self) -> bool {
        self.mode == FieldMode::Basic
    }

    pub fn empty_value(&self) -> FieldValue {
        self.kind.empty_value()
    }

    fn default_mode() -> FieldMode {
        FieldMode::Full
    }
}
