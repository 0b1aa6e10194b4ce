//! Design tokens consumed by the styled slot defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub colors: Colors,
    pub sizing: Sizing,
    pub animation: Animation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Colors {
    pub progress_bar_fill: String,
    pub progress_bar_track: String,
    pub label_text: String,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            progress_bar_fill: "#276EF1".to_string(),
            progress_bar_track: "#EEEEEE".to_string(),
            label_text: "#545454".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sizing {
    pub bar_height_small: String,
    pub bar_height_medium: String,
    pub bar_height_large: String,
    /// Gap between stepped segments.
    pub segment_gap: String,
    pub label_font_size: String,
}

impl Default for Sizing {
    fn default() -> Self {
        Self {
            bar_height_small: "2px".to_string(),
            bar_height_medium: "4px".to_string(),
            bar_height_large: "8px".to_string(),
            segment_gap: "2px".to_string(),
            label_font_size: "14px".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Animation {
    pub infinite_duration: String,
    pub step_pulse_duration: String,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            infinite_duration: "1.6s".to_string(),
            step_pulse_duration: "2.1s".to_string(),
        }
    }
}

impl Theme {
    pub fn from_json(json: &str) -> color_eyre::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> color_eyre::Result<Self> {
        let json = fs_err::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_theme_falls_back_to_defaults() {
        let theme = Theme::from_json(r#"{"colors": {"progress_bar_fill": "red"}}"#).unwrap();
        assert_eq!(theme.colors.progress_bar_fill, "red");
        assert_eq!(theme.colors.progress_bar_track, Colors::default().progress_bar_track);
        assert_eq!(theme.sizing, Sizing::default());
        assert_eq!(theme.animation, Animation::default());
    }

    #[test]
    fn test_invalid_theme_is_an_error() {
        assert!(Theme::from_json("{not json").is_err());
    }

    #[test]
    fn test_missing_theme_file_is_an_error() {
        assert!(Theme::load("/nonexistent/theme.json").is_err());
    }
}
