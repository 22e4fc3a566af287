//! Hardcoded defaults of the rendering components, keyed by variant.
//!
//! These mirror what each template component shows when it receives no data.
//! Templates may shadow individual entries through
//! `TemplateDefinition::component_defaults`.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use invitation_domain::{FieldValue, GalleryImage, SectionId, SectionVariant, StoryMoment};

type VariantDefaults = BTreeMap<&'static str, FieldValue>;

static BUILTIN_COMPONENT_DEFAULTS: Lazy<BTreeMap<&'static str, VariantDefaults>> =
    Lazy::new(builtin_table);

/// Built-in default for `key` in `variant`, falling back to the section's
/// first variant when the requested one does not define it.
pub fn builtin_default(
    section: SectionId,
    variant: &SectionVariant,
    key: &str,
) -> Option<&'static FieldValue> {
    let table = &*BUILTIN_COMPONENT_DEFAULTS;
    table
        .get(variant.as_str())
        .and_then(|defaults| defaults.get(key))
        .or_else(|| {
            table
                .get(section.default_variant().as_str())
                .and_then(|defaults| defaults.get(key))
        })
}

fn builtin_table() -> BTreeMap<&'static str, VariantDefaults> {
    let mut table = BTreeMap::new();

    table.insert(
        "hero_1",
        entries([
            ("groom_name", text("Carlos")),
            ("bride_name", text("María")),
            ("weddingDate", text("2025-06-14T17:00")),
            ("location", text("Hacienda Los Olivos, Lima")),
            ("heroImageUrl", text("/images/templates/hero-1.jpg")),
        ]),
    );
    table.insert(
        "hero_2",
        entries([("heroImageUrl", text("/images/templates/hero-2.jpg"))]),
    );
    table.insert(
        "welcome_1",
        entries([
            ("welcome_title", text("¡Nos casamos!")),
            (
                "welcome_message",
                text("Queremos compartir contigo el día más especial de nuestras vidas."),
            ),
        ]),
    );
    table.insert(
        "couple_1",
        entries([
            ("couple_title", text("Los novios")),
            (
                "groom_description",
                text("Aventurero, soñador y fanático del buen café."),
            ),
            ("groom_photo", text("/images/templates/groom.jpg")),
            (
                "bride_description",
                text("Alegre, curiosa y amante de los atardeceres."),
            ),
            ("bride_photo", text("/images/templates/bride.jpg")),
        ]),
    );
    table.insert(
        "countdown_1",
        entries([
            ("countdown_title", text("Falta poco")),
            ("countdown_image", text("/images/templates/countdown.jpg")),
        ]),
    );
    table.insert(
        "story_1",
        entries([
            ("story_title", text("Nuestra historia")),
            (
                "story_moments",
                FieldValue::Moments(vec![
                    StoryMoment::new(
                        "2018",
                        "Nos conocimos",
                        "Una tarde de lluvia en la universidad.",
                        "/images/templates/story-1.jpg",
                    ),
                    StoryMoment::new(
                        "2021",
                        "Primer viaje",
                        "Cusco nos enseñó a caminar juntos.",
                        "/images/templates/story-2.jpg",
                    ),
                    StoryMoment::new(
                        "2024",
                        "La propuesta",
                        "Frente al mar dijimos que sí.",
                        "/images/templates/story-3.jpg",
                    ),
                ]),
            ),
        ]),
    );
    table.insert(
        "video_1",
        entries([
            ("video_title", text("Nuestro video")),
            ("video_url", text("")),
        ]),
    );
    table.insert(
        "gallery_1",
        entries([
            ("gallery_title", text("Galería")),
            (
                "gallery_images",
                FieldValue::Gallery(
                    (1..=6)
                        .map(|n| {
                            GalleryImage::new(
                                format!("/images/templates/gallery-{n}.jpg"),
                                format!("Foto {n}"),
                                if n <= 3 { "preboda" } else { "pareja" },
                            )
                        })
                        .collect(),
                ),
            ),
        ]),
    );
    table.insert("gallery_2", entries([("gallery_title", text("Momentos"))]));
    table.insert(
        "itinerary_1",
        entries([
            ("itinerary_title", text("Itinerario")),
            ("ceremony_enabled", FieldValue::Toggle(true)),
            ("ceremony_time", text("16:00")),
            ("ceremony_location", text("Parroquia San Pedro")),
            ("reception_enabled", FieldValue::Toggle(true)),
            ("reception_time", text("19:00")),
            ("reception_location", text("Hacienda Los Olivos")),
            ("party_enabled", FieldValue::Toggle(false)),
            ("party_time", text("22:00")),
        ]),
    );
    table.insert(
        "footer_1",
        entries([
            ("footer_message", text("¡Te esperamos!")),
            ("footer_hashtag", text("#CarlosYMaria")),
        ]),
    );

    table
}

fn entries<const N: usize>(items: [(&'static str, FieldValue); N]) -> VariantDefaults {
    items.into_iter().collect()
}

fn text(value: impl Into<String>) -> FieldValue {
    FieldValue::Text(value.into())
}
