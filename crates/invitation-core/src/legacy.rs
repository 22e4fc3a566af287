//! Imports the legacy flat `field_N_subfield` keys into unified collections.
//!
//! Older templates and saved invitations store repeated records as
//! `story_moment_2_title` or `gallery_image_4_url`. Every raw map entering the
//! core passes through [`normalize`] once, so the rest of the pipeline only
//! ever sees `story_moments` and `gallery_images` arrays.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

use invitation_domain::RawData;

pub const STORY_MOMENTS_KEY: &str = "story_moments";
pub const GALLERY_IMAGES_KEY: &str = "gallery_images";
pub const MAX_STORY_MOMENTS: usize = 3;
pub const MAX_GALLERY_IMAGES: usize = 12;

struct LegacyCollection {
    prefix: &'static str,
    unified_key: &'static str,
    limit: usize,
    /// Legacy subfield name -> unified record field name.
    subfields: &'static [(&'static str, &'static str)],
}

const COLLECTIONS: [LegacyCollection; 2] = [
    LegacyCollection {
        prefix: "story_moment_",
        unified_key: STORY_MOMENTS_KEY,
        limit: MAX_STORY_MOMENTS,
        subfields: &[
            ("date", "date"),
            ("title", "title"),
            ("description", "description"),
            ("image", "imageUrl"),
            ("image_url", "imageUrl"),
        ],
    },
    LegacyCollection {
        prefix: "gallery_image_",
        unified_key: GALLERY_IMAGES_KEY,
        limit: MAX_GALLERY_IMAGES,
        subfields: &[("url", "url"), ("alt", "alt"), ("category", "category")],
    },
];

/// Returns a copy of `raw` with legacy flat keys folded into unified arrays.
///
/// When a unified array is already present it takes precedence and the legacy
/// keys are dropped. Missing indices become empty records; trailing empty
/// records are trimmed.
pub fn normalize(raw: &RawData) -> RawData {
    let mut normalized = raw.clone();
    for collection in &COLLECTIONS {
        let mut records: BTreeMap<usize, Map<String, Value>> = BTreeMap::new();
        let legacy_keys: Vec<String> = raw
            .keys()
            .filter(|key| key.starts_with(collection.prefix))
            .cloned()
            .collect();

        for key in &legacy_keys {
            normalized.remove(key);
            let Some((index, field)) = collection.parse(key) else {
                continue;
            };
            if let Some(value) = raw.get(key).filter(|value| !value.is_null()) {
                records
                    .entry(index)
                    .or_default()
                    .insert(field.to_string(), value.clone());
            }
        }

        let has_unified = raw
            .get(collection.unified_key)
            .is_some_and(|value| value.is_array());
        if has_unified || records.is_empty() {
            continue;
        }

        debug!(
            collection = collection.unified_key,
            records = records.len(),
            "imported legacy flat keys"
        );
        let last = records.keys().next_back().copied().unwrap_or(0);
        let items: Vec<Value> = (1..=last)
            .map(|index| Value::Object(records.remove(&index).unwrap_or_default()))
            .collect();
        normalized.insert(collection.unified_key.to_string(), Value::Array(items));
    }
    normalized
}

impl LegacyCollection {
    fn parse(&self, key: &str) -> Option<(usize, &'static str)> {
        let rest = key.strip_prefix(self.prefix)?;
        let (index, subfield) = rest.split_once('_')?;
        let index: usize = index.parse().ok()?;
        if index == 0 || index > self.limit {
            return None;
        }
        self.subfields
            .iter()
            .find(|(legacy, _)| *legacy == subfield)
            .map(|(_, unified)| (index, *unified))
    }
}
