//! Reader appearance settings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ReaderError, Result};

/// Storage key of the serialized settings.
pub const SETTINGS_KEY: &str = "read_settings";

pub const MIN_FONT_SIZE: u32 = 12;
pub const MAX_FONT_SIZE: u32 = 36;

/// A background/text colour pair offered in the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub bg_color: &'static str,
    pub text_color: &'static str,
}

pub const THEMES: &[Theme] = &[
    Theme {
        name: "Default",
        bg_color: "#ffffff",
        text_color: "#374151",
    },
    Theme {
        name: "Parchment",
        bg_color: "#f5ecd7",
        text_color: "#5b4636",
    },
    Theme {
        name: "Eye care",
        bg_color: "#cce8cf",
        text_color: "#2f3b2f",
    },
    Theme {
        name: "Night",
        bg_color: "#1f2937",
        text_color: "#d1d5db",
    },
];

/// Font sizes offered as quick-pick buttons next to the slider.
pub const FONT_PRESETS: &[u32] = &[14, 16, 18, 20, 24];

/// Font size and colours of the chapter view.
///
/// Serialized as `{"fontSize":"18px","bgColor":"#ffffff","textColor":"#374151"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReaderSettings {
    #[serde(serialize_with = "serialize_px", deserialize_with = "deserialize_px")]
    pub font_size: u32,
    pub bg_color: String,
    pub text_color: String,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        let theme = THEMES[0];
        Self {
            font_size: 18,
            bg_color: theme.bg_color.to_string(),
            text_color: theme.text_color.to_string(),
        }
    }
}

impl ReaderSettings {
    /// Parse stored settings, falling back to defaults when absent or broken.
    pub fn load(raw: Option<&str>) -> Self {
        match raw.filter(|s| !s.is_empty()).map(Self::from_json) {
            Some(Ok(settings)) => settings,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "Discarding stored reader settings");
                Self::default()
            }
            None => Self::default(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let mut settings: Self =
            serde_json::from_str(raw).map_err(|e| ReaderError::SettingsError(e.to_string()))?;
        settings.font_size = clamp_font_size(settings.font_size);
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn with_font_size(mut self, px: u32) -> Self {
        self.font_size = clamp_font_size(px);
        self
    }

    pub fn with_theme(mut self, bg_color: &str, text_color: &str) -> Self {
        self.bg_color = bg_color.to_string();
        self.text_color = text_color.to_string();
        self
    }

    /// CSS value for `font-size`.
    pub fn font_size_css(&self) -> String {
        format!("{}px", self.font_size)
    }

    pub fn is_theme(&self, theme: &Theme) -> bool {
        self.bg_color.eq_ignore_ascii_case(theme.bg_color)
    }
}

pub fn clamp_font_size(px: u32) -> u32 {
    px.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}

fn serialize_px<S: Serializer>(px: &u32, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{}px", px))
}

fn deserialize_px<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u32, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let digits = raw.trim().trim_end_matches("px").trim();
    digits
        .parse::<f64>()
        .map(|px| px.round().max(0.0) as u32)
        .map_err(|_| serde::de::Error::custom(format!("invalid font size: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_json_layout() {
        assert_eq!(
            ReaderSettings::default().to_json(),
            r##"{"fontSize":"18px","bgColor":"#ffffff","textColor":"#374151"}"##
        );
    }

    #[test]
    fn test_load_existing() {
        let raw = r##"{"fontSize":"22px","bgColor":"#1f2937","textColor":"#d1d5db"}"##;
        let settings = ReaderSettings::load(Some(raw));
        assert_eq!(settings.font_size, 22);
        assert!(settings.is_theme(&THEMES[3]));
    }

    #[test]
    fn test_load_falls_back() {
        assert_eq!(ReaderSettings::load(None), ReaderSettings::default());
        assert_eq!(ReaderSettings::load(Some("")), ReaderSettings::default());
        assert_eq!(
            ReaderSettings::load(Some(r#"{"fontSize":"big"}"#)),
            ReaderSettings::default()
        );
    }

    #[test]
    fn test_font_size_clamped() {
        let settings = ReaderSettings::default().with_font_size(80);
        assert_eq!(settings.font_size, MAX_FONT_SIZE);
        let raw = r##"{"fontSize":"4px","bgColor":"#fff","textColor":"#000"}"##;
        assert_eq!(ReaderSettings::from_json(raw).unwrap().font_size, MIN_FONT_SIZE);
    }

    #[test]
    fn test_with_theme() {
        let night = THEMES[3];
        let settings = ReaderSettings::default().with_theme(night.bg_color, night.text_color);
        assert_eq!(settings.text_color, "#d1d5db");
        assert!(!settings.is_theme(&THEMES[0]));
    }
}
