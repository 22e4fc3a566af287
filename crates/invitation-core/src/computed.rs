//! Fields synthesized from other fields on every merge.
//!
//! Computed values are never stored in the session; they are rebuilt from the
//! merged flat data each time so they cannot go stale.

use serde_json::Value;

use invitation_domain::RawData;

use crate::{
    format::{format_event_date, DateFormatter},
    merge::text_value,
};

pub const COUPLE_NAMES_KEY: &str = "coupleNames";
pub const EVENT_DATE_KEY: &str = "eventDate";
pub const FOOTER_EVENT_DATE_KEY: &str = "footer_eventDate";
pub const COUPLE_NAMES_FALLBACK: &str = "Novio & Novia";

const GROOM_NAME_KEY: &str = "groom_name";
const BRIDE_NAME_KEY: &str = "bride_name";
const WEDDING_DATE_KEY: &str = "weddingDate";

struct ComputedField {
    key: &'static str,
    derive: fn(&RawData, &dyn DateFormatter) -> String,
}

const COMPUTED_FIELDS: [ComputedField; 3] = [
    ComputedField {
        key: COUPLE_NAMES_KEY,
        derive: derive_couple_names,
    },
    ComputedField {
        key: EVENT_DATE_KEY,
        derive: derive_event_date,
    },
    ComputedField {
        key: FOOTER_EVENT_DATE_KEY,
        derive: derive_footer_event_date,
    },
];

/// Writes every computed field into `data`, replacing previous values.
pub fn apply_computed_fields(data: &mut RawData, formatter: &dyn DateFormatter) {
    for field in &COMPUTED_FIELDS {
        let value = (field.derive)(data, formatter);
        data.insert(field.key.to_string(), Value::String(value));
    }
}

/// Joins the two names as `Groom & Bride`, keeping whichever is present when
/// one is blank.
pub fn couple_names(groom: &str, bride: &str) -> String {
    match (groom.trim(), bride.trim()) {
        ("", "") => COUPLE_NAMES_FALLBACK.to_string(),
        (name, "") | ("", name) => name.to_string(),
        (groom, bride) => format!("{groom} & {bride}"),
    }
}

fn derive_couple_names(data: &RawData, _: &dyn DateFormatter) -> String {
    couple_names(
        &text_value(data, GROOM_NAME_KEY),
        &text_value(data, BRIDE_NAME_KEY),
    )
}

fn derive_event_date(data: &RawData, formatter: &dyn DateFormatter) -> String {
    format_event_date(&text_value(data, WEDDING_DATE_KEY), formatter)
}

fn derive_footer_event_date(data: &RawData, formatter: &dyn DateFormatter) -> String {
    derive_event_date(data, formatter).to_uppercase()
}
