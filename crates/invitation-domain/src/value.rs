//! Field values and the structured records they may carry.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::field::FieldKind;

/// Image shown in the gallery section.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GalleryImage {
    pub url: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub category: String,
}

impl GalleryImage {
    pub fn new(url: impl Into<String>, alt: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt: alt.into(),
            category: category.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.url.trim().is_empty()
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(url) => Some(Self::new(url.as_str(), "", "")),
            Value::Object(map) => Some(Self {
                url: string_entry(map, &["url", "src", "image"]),
                alt: string_entry(map, &["alt", "caption"]),
                category: string_entry(map, &["category"]),
            }),
            _ => None,
        }
    }
}

/// One entry of the couple's story timeline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StoryMoment {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "image_url")]
    pub image_url: String,
}

impl StoryMoment {
    pub fn new(
        date: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            title: title.into(),
            description: description.into(),
            image_url: image_url.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        [&self.date, &self.title, &self.description, &self.image_url]
            .iter()
            .all(|part| part.trim().is_empty())
    }

    fn from_json(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        Some(Self {
            date: string_entry(map, &["date"]),
            title: string_entry(map, &["title"]),
            description: string_entry(map, &["description", "text"]),
            image_url: string_entry(map, &["imageUrl", "image_url", "image"]),
        })
    }
}

/// Value held by a customizer field.
///
/// Serialized untagged so persisted payloads stay plain JSON. Deserialization
/// cannot tell an empty gallery from an empty story list; callers that know the
/// field kind should pass values through [`FieldValue::coerce`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Toggle(bool),
    Text(String),
    Moments(Vec<StoryMoment>),
    Gallery(Vec<GalleryImage>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Toggle(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_gallery(&self) -> Option<&[GalleryImage]> {
        match self {
            FieldValue::Gallery(images) => Some(images),
            _ => None,
        }
    }

    pub fn as_moments(&self) -> Option<&[StoryMoment]> {
        match self {
            FieldValue::Moments(moments) => Some(moments),
            _ => None,
        }
    }

    /// True when the value carries no user-visible content. Toggles are never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Toggle(_) => false,
            FieldValue::Text(text) => text.trim().is_empty(),
            FieldValue::Moments(moments) => moments.iter().all(StoryMoment::is_empty),
            FieldValue::Gallery(images) => images.iter().all(GalleryImage::is_empty),
        }
    }

    /// Empty value of the same shape.
    pub fn empty_like(&self) -> Self {
        match self {
            FieldValue::Toggle(_) => FieldValue::Toggle(false),
            FieldValue::Text(_) => FieldValue::Text(String::new()),
            FieldValue::Moments(_) => FieldValue::Moments(Vec::new()),
            FieldValue::Gallery(_) => FieldValue::Gallery(Vec::new()),
        }
    }

    /// Reads a raw JSON value as the given kind. Returns `None` for null or
    /// values that cannot represent the kind.
    pub fn from_json(kind: FieldKind, value: &Value) -> Option<Self> {
        match kind {
            FieldKind::Toggle => parse_toggle(value).map(FieldValue::Toggle),
            FieldKind::Gallery => value.as_array().map(|items| {
                FieldValue::Gallery(items.iter().filter_map(GalleryImage::from_json).collect())
            }),
            FieldKind::StoryMoments => value.as_array().map(|items| {
                FieldValue::Moments(items.iter().filter_map(StoryMoment::from_json).collect())
            }),
            _ => match value {
                Value::String(text) => Some(FieldValue::Text(text.clone())),
                Value::Number(number) => Some(FieldValue::Text(number.to_string())),
                Value::Bool(flag) => Some(FieldValue::Text(flag.to_string())),
                _ => None,
            },
        }
    }

    /// Converts the value into the representation expected by `kind`,
    /// falling back to the kind's empty value when no sensible mapping exists.
    pub fn coerce(self, kind: FieldKind) -> Self {
        match (kind, self) {
            (FieldKind::Toggle, FieldValue::Toggle(flag)) => FieldValue::Toggle(flag),
            (FieldKind::Toggle, FieldValue::Text(text)) => {
                FieldValue::Toggle(parse_toggle(&Value::String(text)).unwrap_or(false))
            }
            (FieldKind::Gallery, FieldValue::Gallery(images)) => FieldValue::Gallery(images),
            (FieldKind::StoryMoments, FieldValue::Moments(moments)) => FieldValue::Moments(moments),
            (FieldKind::Gallery | FieldKind::StoryMoments, other) => {
                FieldValue::from_json(kind, &other.to_json()).unwrap_or_else(|| kind.empty_value())
            }
            (_, FieldValue::Text(text)) => FieldValue::Text(text),
            (_, FieldValue::Toggle(flag)) => FieldValue::Text(flag.to_string()),
            (kind, _) => kind.empty_value(),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Toggle(flag) => Value::Bool(*flag),
            FieldValue::Text(text) => Value::String(text.clone()),
            FieldValue::Moments(moments) => Value::Array(
                moments
                    .iter()
                    .map(|moment| {
                        let mut map = Map::new();
                        map.insert("date".into(), Value::String(moment.date.clone()));
                        map.insert("title".into(), Value::String(moment.title.clone()));
                        map.insert(
                            "description".into(),
                            Value::String(moment.description.clone()),
                        );
                        map.insert("imageUrl".into(), Value::String(moment.image_url.clone()));
                        Value::Object(map)
                    })
                    .collect(),
            ),
            FieldValue::Gallery(images) => Value::Array(
                images
                    .iter()
                    .map(|image| {
                        let mut map = Map::new();
                        map.insert("url".into(), Value::String(image.url.clone()));
                        map.insert("alt".into(), Value::String(image.alt.clone()));
                        map.insert("category".into(), Value::String(image.category.clone()));
                        Value::Object(map)
                    })
                    .collect(),
            ),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Toggle(value)
    }
}

impl From<Vec<GalleryImage>> for FieldValue {
    fn from(value: Vec<GalleryImage>) -> Self {
        FieldValue::Gallery(value)
    }
}

impl From<Vec<StoryMoment>> for FieldValue {
    fn from(value: Vec<StoryMoment>) -> Self {
        FieldValue::Moments(value)
    }
}

fn parse_toggle(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => number.as_f64().map(|n| n != 0.0),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "on" | "yes" | "si" | "sí" => Some(true),
            "false" | "0" | "off" | "no" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn string_entry(map: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| match map.get(*key) {
            Some(Value::String(text)) => Some(text.clone()),
            Some(Value::Number(number)) => Some(number.to_string()),
            _ => None,
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn text_kinds_accept_numbers_and_reject_null() {
        assert_eq!(
            FieldValue::from_json(FieldKind::Text, &json!(42)),
            Some(FieldValue::text("42"))
        );
        assert_eq!(FieldValue::from_json(FieldKind::Date, &Value::Null), None);
    }

    #[test]
    fn toggles_read_common_spellings() {
        assert_eq!(
            FieldValue::from_json(FieldKind::Toggle, &json!("on")),
            Some(FieldValue::Toggle(true))
        );
        assert_eq!(
            FieldValue::from_json(FieldKind::Toggle, &json!(0)),
            Some(FieldValue::Toggle(false))
        );
        assert_eq!(FieldValue::from_json(FieldKind::Toggle, &json!("maybe")), None);
    }

    #[test]
    fn gallery_items_accept_strings_and_objects() {
        let value = json!(["/a.jpg", {"src": "/b.jpg", "alt": "B", "category": "boda"}, 7]);
        let parsed = FieldValue::from_json(FieldKind::Gallery, &value).expect("gallery");
        assert_eq!(
            parsed,
            FieldValue::Gallery(vec![
                GalleryImage::new("/a.jpg", "", ""),
                GalleryImage::new("/b.jpg", "B", "boda"),
            ])
        );
    }

    #[test]
    fn coerce_resolves_ambiguous_empty_lists() {
        let decoded: FieldValue = serde_json::from_value(json!([])).expect("decode");
        assert_eq!(
            decoded.coerce(FieldKind::Gallery),
            FieldValue::Gallery(Vec::new())
        );
        assert_eq!(
            FieldValue::text("sí").coerce(FieldKind::Toggle),
            FieldValue::Toggle(true)
        );
    }

    #[test]
    fn blank_detection_ignores_toggles() {
        assert!(FieldValue::text("   ").is_blank());
        assert!(!FieldValue::Toggle(false).is_blank());
        assert!(FieldValue::Gallery(vec![GalleryImage::default()]).is_blank());
    }
}
