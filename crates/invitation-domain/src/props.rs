//! Nested props handed to the rendering layer.
//!
//! Field names here form the contract with the template components; they are
//! serialized in camelCase and must stay stable.

use serde::{Deserialize, Serialize};

use crate::value::{GalleryImage, StoryMoment};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedTemplateProps {
    pub hero: HeroProps,
    pub welcome: WelcomeProps,
    pub couple: CoupleProps,
    pub countdown: CountdownProps,
    pub story: StoryProps,
    pub video: VideoProps,
    pub gallery: GalleryProps,
    pub itinerary: ItineraryProps,
    pub footer: FooterProps,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroProps {
    pub couple_names: String,
    pub groom_name: String,
    pub bride_name: String,
    /// Formatted long date.
    pub event_date: String,
    /// Raw date as entered, for machine consumers.
    pub wedding_date: String,
    pub location: String,
    pub image_url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeProps {
    pub title: String,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoupleProps {
    pub title: String,
    pub groom_name: String,
    pub groom_description: String,
    pub groom_photo: String,
    pub bride_name: String,
    pub bride_description: String,
    pub bride_photo: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownProps {
    pub title: String,
    pub target_date: String,
    pub background_image: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryProps {
    pub title: String,
    pub moments: Vec<StoryMoment>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoProps {
    pub title: String,
    pub video_url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryProps {
    pub title: String,
    pub images: Vec<GalleryImage>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItineraryEventKind {
    Ceremony,
    Reception,
    Party,
}

impl ItineraryEventKind {
    pub const ALL: [ItineraryEventKind; 3] = [
        ItineraryEventKind::Ceremony,
        ItineraryEventKind::Reception,
        ItineraryEventKind::Party,
    ];

    /// Field key prefix, e.g. `ceremony` for `ceremony_time`.
    pub fn key_prefix(self) -> &'static str {
        match self {
            ItineraryEventKind::Ceremony => "ceremony",
            ItineraryEventKind::Reception => "reception",
            ItineraryEventKind::Party => "party",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ItineraryEventKind::Ceremony => "Ceremonia",
            ItineraryEventKind::Reception => "Recepción",
            ItineraryEventKind::Party => "Fiesta",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryEvent {
    pub kind: ItineraryEventKind,
    pub name: String,
    pub time: String,
    pub location: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryProps {
    pub title: String,
    pub events: Vec<ItineraryEvent>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterProps {
    pub couple_names: String,
    /// Uppercase variant of the formatted date.
    pub event_date: String,
    pub message: String,
    pub hashtag: String,
}
