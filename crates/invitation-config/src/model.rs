use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use invitation_domain::FieldMode;

use crate::ConfigError;

/// Keys accepted by [`EditorConfig::set`].
pub const CONFIG_KEYS: [&str; 5] = [
    "locale",
    "default_mode",
    "date_fallback",
    "sessions_dir",
    "ui_color_enabled",
];

/// Stores user-configurable editor preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Locale tag used for long dates, e.g. `es-PE`.
    pub locale: String,
    #[serde(default)]
    pub default_mode: FieldMode,
    /// Replaces the locale's text for missing or unparseable dates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_fallback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for saved sessions.
    pub sessions_dir: Option<PathBuf>,
    #[serde(default = "EditorConfig::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            default_mode: FieldMode::default(),
            date_fallback: None,
            sessions_dir: None,
            ui_color_enabled: Self::default_ui_color_enabled(),
        }
    }
}

impl EditorConfig {
    pub fn default_locale() -> String {
        "es-PE".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Updates one preference from its textual form. An empty value clears
    /// optional settings.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let trimmed = value.trim();
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "locale" if !trimmed.is_empty() => self.locale = trimmed.to_string(),
            "default_mode" => {
                self.default_mode = trimmed.parse().map_err(|_| invalid())?
            }
            "date_fallback" => {
                self.date_fallback = (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            "sessions_dir" => {
                self.sessions_dir = (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
            }
            "ui_color_enabled" => {
                self.ui_color_enabled = match trimmed.to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" | "1" => true,
                    "false" | "off" | "no" | "0" => false,
                    _ => return Err(invalid()),
                }
            }
            _ => return Err(invalid()),
        }
        Ok(())
    }

    /// Directory sessions are stored in: the configured override, otherwise
    /// `sessions/` under `base`.
    pub fn resolve_sessions_dir(&self, base: &Path) -> PathBuf {
        match &self.sessions_dir {
            Some(path) => path.clone(),
            None => base.join("sessions"),
        }
    }
}
