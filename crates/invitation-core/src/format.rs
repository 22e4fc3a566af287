//! Event date parsing and locale-aware long-date formatting.

use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime, Utc};

/// Literal shown when the event date is missing or unparseable.
pub const DATE_FALLBACK: &str = "Fecha por confirmar";

/// Formats event dates for presentation.
pub trait DateFormatter {
    fn format_date(&self, date: NaiveDate) -> String;

    /// Text used when no date can be parsed.
    fn fallback(&self) -> &str {
        DATE_FALLBACK
    }
}

/// Long-form localized date, e.g. `domingo, 15 de diciembre de 2024`.
#[derive(Debug, Clone)]
pub struct LocaleDateFormatter {
    locale: Locale,
    pattern: &'static str,
    fallback: String,
}

impl LocaleDateFormatter {
    pub fn spanish() -> Self {
        Self {
            locale: Locale::es_ES,
            pattern: "%A, %-d de %B de %Y",
            fallback: DATE_FALLBACK.to_string(),
        }
    }

    pub fn english() -> Self {
        Self {
            locale: Locale::en_US,
            pattern: "%A, %B %-d, %Y",
            fallback: "Date to be confirmed".to_string(),
        }
    }

    /// Picks a formatter from a BCP 47-ish tag (`es-PE`, `en_US`). Anything
    /// that is not English formats in Spanish.
    pub fn for_locale_tag(tag: &str) -> Self {
        let language = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "en" => Self::english(),
            _ => Self::spanish(),
        }
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }
}

impl Default for LocaleDateFormatter {
    fn default() -> Self {
        Self::spanish()
    }
}

impl DateFormatter for LocaleDateFormatter {
    fn format_date(&self, date: NaiveDate) -> String {
        let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default();
        DateTime::<Utc>::from_naive_utc_and_offset(midnight, Utc)
            .format_localized(self.pattern, self.locale)
            .to_string()
    }

    fn fallback(&self) -> &str {
        &self.fallback
    }
}

/// Parses the date portion of a raw event date.
///
/// Accepts `YYYY-MM-DDTHH:MM`, `YYYY-MM-DDTHH:MM:SS`, RFC 3339 and plain
/// `YYYY-MM-DD`. Offsets are ignored; the date is taken as written.
pub fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.naive_local().date());
    }
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(trimmed, pattern).ok())
        .map(|parsed| parsed.date())
        .or_else(|| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok())
}

/// Formats `raw` with `formatter`, returning the formatter's fallback when the
/// input cannot be parsed.
pub fn format_event_date(raw: &str, formatter: &dyn DateFormatter) -> String {
    match parse_event_date(raw) {
        Some(date) => formatter.format_date(date),
        None => formatter.fallback().to_string(),
    }
}
