//! Progressive merge of session state into render props.
//!
//! Only touched fields override the template defaults; everything else falls
//! through to what the template author wrote. The merge is total: missing or
//! malformed data resolves to fallback literals, never to an error.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use invitation_domain::{
    CoupleProps, CountdownProps, FieldDefinition, FieldKind, FieldValue, FooterProps,
    GalleryImage, GalleryProps, HeroProps, ItineraryEvent, ItineraryEventKind, ItineraryProps,
    MergedTemplateProps, RawData, StoryMoment, StoryProps, TemplateDefaults, VideoProps,
    WelcomeProps,
};

use crate::{
    computed::{apply_computed_fields, COUPLE_NAMES_KEY, EVENT_DATE_KEY, FOOTER_EVENT_DATE_KEY},
    format::{DateFormatter, LocaleDateFormatter},
    legacy::{self, GALLERY_IMAGES_KEY, STORY_MOMENTS_KEY},
};

/// Image URLs containing this marker are template stand-ins, not real photos.
pub const PLACEHOLDER_IMAGE_MARKER: &str = "placeholder";

/// Borrowed session state the merge reads from.
#[derive(Debug, Clone, Copy)]
pub struct MergeInput<'a> {
    pub fields: &'a [FieldDefinition],
    pub touched: &'a BTreeSet<String>,
    pub values: &'a BTreeMap<String, FieldValue>,
    pub defaults: &'a TemplateDefaults,
    pub template_data: &'a RawData,
}

impl MergeInput<'_> {
    /// Applies the progressive merge rule to one field: the user's value when
    /// touched, otherwise the template default.
    ///
    /// Collections keep only renderable entries. A touched collection left with
    /// none falls back to the defaults so the section never renders empty.
    pub fn progressive_value(&self, definition: &FieldDefinition) -> FieldValue {
        let key = definition.key.as_str();
        let default = || {
            self.defaults
                .get(key)
                .cloned()
                .unwrap_or_else(|| definition.empty_value())
        };
        if !self.touched.contains(key) {
            return renderable_entries(default());
        }
        let value = self
            .values
            .get(key)
            .cloned()
            .map(renderable_entries)
            .unwrap_or_else(|| definition.empty_value());
        if definition.kind.is_collection() && value.is_blank() {
            return renderable_entries(default());
        }
        value
    }
}

/// Drops collection entries that would not render; scalars pass through.
fn renderable_entries(value: FieldValue) -> FieldValue {
    match value {
        FieldValue::Gallery(images) => {
            FieldValue::Gallery(images.into_iter().filter(is_renderable_image).collect())
        }
        FieldValue::Moments(moments) => {
            FieldValue::Moments(moments.into_iter().filter(is_renderable_moment).collect())
        }
        other => other,
    }
}

fn is_renderable_image(image: &GalleryImage) -> bool {
    !is_placeholder_url(&image.url)
}

fn is_renderable_moment(moment: &StoryMoment) -> bool {
    !moment.title.trim().is_empty() || !moment.description.trim().is_empty()
}

/// Flat merged data: raw template data overlaid with the progressive values,
/// plus computed fields.
pub fn merge_flat(input: &MergeInput<'_>, formatter: &dyn DateFormatter) -> RawData {
    let mut merged = legacy::normalize(input.template_data);
    for definition in input.fields {
        merged.insert(
            definition.key.clone(),
            input.progressive_value(definition).to_json(),
        );
    }
    apply_computed_fields(&mut merged, formatter);
    debug!(
        fields = input.fields.len(),
        touched = input.touched.len(),
        "merged template data"
    );
    merged
}

/// Merges with the default Spanish date formatting.
pub fn merge_and_transform(input: &MergeInput<'_>) -> MergedTemplateProps {
    merge_and_transform_with(input, &LocaleDateFormatter::default())
}

pub fn merge_and_transform_with(
    input: &MergeInput<'_>,
    formatter: &dyn DateFormatter,
) -> MergedTemplateProps {
    reshape(&merge_flat(input, formatter))
}

/// Groups flat merged data into the nested per-section props.
pub fn reshape(data: &RawData) -> MergedTemplateProps {
    let couple_names = text_value(data, COUPLE_NAMES_KEY);
    let groom_name = text_value(data, "groom_name");
    let bride_name = text_value(data, "bride_name");
    let wedding_date = text_value(data, "weddingDate");

    MergedTemplateProps {
        hero: HeroProps {
            couple_names: couple_names.clone(),
            groom_name: groom_name.clone(),
            bride_name: bride_name.clone(),
            event_date: text_value(data, EVENT_DATE_KEY),
            wedding_date: wedding_date.clone(),
            location: text_value(data, "location"),
            image_url: text_value(data, "heroImageUrl"),
        },
        welcome: WelcomeProps {
            title: text_value(data, "welcome_title"),
            message: text_value(data, "welcome_message"),
        },
        couple: CoupleProps {
            title: text_value(data, "couple_title"),
            groom_name,
            groom_description: text_value(data, "groom_description"),
            groom_photo: text_value(data, "groom_photo"),
            bride_name,
            bride_description: text_value(data, "bride_description"),
            bride_photo: text_value(data, "bride_photo"),
        },
        countdown: CountdownProps {
            title: text_value(data, "countdown_title"),
            target_date: wedding_date,
            background_image: text_value(data, "countdown_image"),
        },
        story: StoryProps {
            title: text_value(data, "story_title"),
            moments: story_moments(data),
        },
        video: VideoProps {
            title: text_value(data, "video_title"),
            video_url: text_value(data, "video_url"),
        },
        gallery: GalleryProps {
            title: text_value(data, "gallery_title"),
            images: gallery_images(data),
        },
        itinerary: ItineraryProps {
            title: text_value(data, "itinerary_title"),
            events: itinerary_events(data),
        },
        footer: FooterProps {
            couple_names,
            event_date: text_value(data, FOOTER_EVENT_DATE_KEY),
            message: text_value(data, "footer_message"),
            hashtag: text_value(data, "footer_hashtag"),
        },
    }
}

/// Reads `key` as display text; non-text values read as empty.
pub(crate) fn text_value(data: &RawData, key: &str) -> String {
    data.get(key)
        .and_then(|value| FieldValue::from_json(FieldKind::Text, value))
        .and_then(|value| value.as_text().map(str::to_string))
        .unwrap_or_default()
}

fn flag_value(data: &RawData, key: &str) -> bool {
    data.get(key)
        .and_then(|value| FieldValue::from_json(FieldKind::Toggle, value))
        .and_then(|value| value.as_bool())
        .unwrap_or(false)
}

fn gallery_images(data: &RawData) -> Vec<GalleryImage> {
    match data
        .get(GALLERY_IMAGES_KEY)
        .and_then(|value| FieldValue::from_json(FieldKind::Gallery, value))
    {
        Some(FieldValue::Gallery(images)) => images
            .into_iter()
            .filter(is_renderable_image)
            .collect(),
        _ => Vec::new(),
    }
}

fn story_moments(data: &RawData) -> Vec<StoryMoment> {
    match data
        .get(STORY_MOMENTS_KEY)
        .and_then(|value| FieldValue::from_json(FieldKind::StoryMoments, value))
    {
        Some(FieldValue::Moments(moments)) => moments
            .into_iter()
            .filter(is_renderable_moment)
            .collect(),
        _ => Vec::new(),
    }
}

fn itinerary_events(data: &RawData) -> Vec<ItineraryEvent> {
    ItineraryEventKind::ALL
        .into_iter()
        .filter(|kind| flag_value(data, &format!("{}_enabled", kind.key_prefix())))
        .map(|kind| ItineraryEvent {
            kind,
            name: kind.display_name().to_string(),
            time: text_value(data, &format!("{}_time", kind.key_prefix())),
            location: text_value(data, &format!("{}_location", kind.key_prefix())),
        })
        .collect()
}

fn is_placeholder_url(url: &str) -> bool {
    let trimmed = url.trim();
    trimmed.is_empty() || trimmed.to_ascii_lowercase().contains(PLACEHOLDER_IMAGE_MARKER)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::catalog::fields_for_sections;
    use invitation_domain::SectionId;

    struct Fixture {
        fields: Vec<FieldDefinition>,
        touched: BTreeSet<String>,
        values: BTreeMap<String, FieldValue>,
        defaults: TemplateDefaults,
        template_data: RawData,
    }

    impl Fixture {
        fn new() -> Self {
            let fields = fields_for_sections(&SectionId::ALL);
            let defaults = fields
                .iter()
                .map(|f| {
                    let value = match f.key.as_str() {
                        "groom_name" => FieldValue::text("Carlos"),
                        "bride_name" => FieldValue::text("María"),
                        "heroImageUrl" => FieldValue::text("/tpl/hero.jpg"),
                        "ceremony_enabled" => FieldValue::Toggle(true),
                        "gallery_images" => FieldValue::Gallery(vec![
                            GalleryImage::new("/tpl/1.jpg", "uno", ""),
                            GalleryImage::new("/placeholder.svg", "", ""),
                        ]),
                        _ => f.empty_value(),
                    };
                    (f.key.clone(), value)
                })
                .collect();
            Self {
                fields,
                touched: BTreeSet::new(),
                values: BTreeMap::new(),
                defaults,
                template_data: RawData::new(),
            }
        }

        fn touch(&mut self, key: &str, value: FieldValue) {
            self.touched.insert(key.to_string());
            self.values.insert(key.to_string(), value);
        }

        fn input(&self) -> MergeInput<'_> {
            MergeInput {
                fields: &self.fields,
                touched: &self.touched,
                values: &self.values,
                defaults: &self.defaults,
                template_data: &self.template_data,
            }
        }
    }

    #[test]
    fn untouched_fields_fall_through_to_defaults() {
        let mut fixture = Fixture::new();
        fixture
            .values
            .insert("groom_name".into(), FieldValue::text("ignored"));
        let props = merge_and_transform(&fixture.input());
        assert_eq!(props.hero.groom_name, "Carlos");
        assert_eq!(props.hero.image_url, "/tpl/hero.jpg");
    }

    #[test]
    fn touched_empty_text_overrides_default() {
        let mut fixture = Fixture::new();
        fixture.touch("groom_name", FieldValue::text(""));
        let props = merge_and_transform(&fixture.input());
        assert_eq!(props.hero.groom_name, "");
        assert_eq!(props.hero.couple_names, "María");
    }

    #[test]
    fn merged_values_win_over_raw_template_data() {
        let mut fixture = Fixture::new();
        fixture.template_data = json!({"groom_name": "Raw", "dress_code": "Formal"})
            .as_object()
            .cloned()
            .unwrap_or_default();
        let flat = merge_flat(&fixture.input(), &LocaleDateFormatter::default());
        assert_eq!(flat["groom_name"], json!("Carlos"));
        assert_eq!(flat["dress_code"], json!("Formal"));
    }

    #[test]
    fn placeholder_gallery_entries_are_filtered() {
        let fixture = Fixture::new();
        let props = merge_and_transform(&fixture.input());
        assert_eq!(
            props.gallery.images,
            vec![GalleryImage::new("/tpl/1.jpg", "uno", "")]
        );
    }

    #[test]
    fn touched_but_empty_gallery_falls_back_to_defaults() {
        let mut fixture = Fixture::new();
        fixture.touch(
            "gallery_images",
            FieldValue::Gallery(vec![GalleryImage::default()]),
        );
        let props = merge_and_transform(&fixture.input());
        assert_eq!(props.gallery.images.len(), 1);
        assert_eq!(props.gallery.images[0].url, "/tpl/1.jpg");
    }

    #[test]
    fn touched_collections_without_renderable_entries_fall_back() {
        let mut fixture = Fixture::new();
        let told = StoryMoment {
            title: "Nos conocimos".into(),
            ..StoryMoment::default()
        };
        fixture
            .defaults
            .insert("story_moments".into(), FieldValue::Moments(vec![told]));
        fixture.touch(
            "gallery_images",
            FieldValue::Gallery(vec![GalleryImage::new("/img/placeholder.svg", "", "")]),
        );
        fixture.touch(
            "story_moments",
            FieldValue::Moments(vec![StoryMoment {
                date: "2020".into(),
                image_url: "/a.jpg".into(),
                ..StoryMoment::default()
            }]),
        );

        let props = merge_and_transform(&fixture.input());
        assert_eq!(
            props.gallery.images,
            vec![GalleryImage::new("/tpl/1.jpg", "uno", "")]
        );
        assert_eq!(props.story.moments.len(), 1);
        assert_eq!(props.story.moments[0].title, "Nos conocimos");

        let flat = merge_flat(&fixture.input(), &LocaleDateFormatter::default());
        assert_eq!(flat["gallery_images"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn touched_gallery_drops_empty_entries() {
        let mut fixture = Fixture::new();
        fixture.touch(
            "gallery_images",
            FieldValue::Gallery(vec![
                GalleryImage::new("/mine/1.jpg", "", "boda"),
                GalleryImage::default(),
                GalleryImage::new("/mine/3.jpg", "", ""),
            ]),
        );
        let props = merge_and_transform(&fixture.input());
        let urls: Vec<&str> = props.gallery.images.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, vec!["/mine/1.jpg", "/mine/3.jpg"]);
    }

    #[test]
    fn itinerary_follows_toggles() {
        let mut fixture = Fixture::new();
        fixture.touch("party_enabled", FieldValue::Toggle(true));
        fixture.touch("party_time", FieldValue::text("23:00"));
        let props = merge_and_transform(&fixture.input());
        let kinds: Vec<ItineraryEventKind> =
            props.itinerary.events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![ItineraryEventKind::Ceremony, ItineraryEventKind::Party]
        );
        assert_eq!(props.itinerary.events[1].time, "23:00");
    }

    #[test]
    fn malformed_inputs_never_fail() {
        let mut fixture = Fixture::new();
        fixture.touch("weddingDate", FieldValue::Toggle(true));
        fixture.touch("story_moments", FieldValue::text("not a list"));
        let props = merge_and_transform(&fixture.input());
        assert_eq!(props.hero.event_date, crate::format::DATE_FALLBACK);
        assert!(props.story.moments.is_empty());
    }
}
