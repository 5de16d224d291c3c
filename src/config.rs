//! Map configuration
//!
//! Every numeric layout constant used by the roster, layout and bar code is
//! collected here, deserialized from a TOML file with built-in defaults for
//! every field. A configuration is resolved once per map instance and never
//! changes afterwards.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::color::Color;

/// Errors that can occur when loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Layout constants for one map instance
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub roster: RosterLimits,
    pub ids: GroupIds,
    pub names: NameStyle,
    pub squares: SquareStyle,
    pub portraits: PortraitStyle,
    pub votes: VoteStyle,
    pub bar: BarStyle,
    pub triangles: TriangleStyle,
    pub title: TitleStyle,
    pub chrome: ChromeSpacing,
}

impl MapConfig {
    /// Load configuration from a TOML file. Missing fields fall back to the
    /// built-in defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Roster size limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RosterLimits {
    /// Hard maximum number of candidates a map can hold
    pub max_candidates: usize,
    /// Roster size at which the linear layout hands off to the condensed
    /// layout
    pub switch_threshold: usize,
}

impl Default for RosterLimits {
    fn default() -> Self {
        Self {
            max_candidates: 8,
            switch_threshold: 5,
        }
    }
}

/// Identifiers of the distinguished element groups in the document
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GroupIds {
    pub regions: String,
    pub numbers: String,
    pub name_list: String,
    pub square_list: String,
    pub picture_list: String,
    pub vote_list: String,
    pub bar: String,
}

impl Default for GroupIds {
    fn default() -> Self {
        Self {
            regions: "regions".to_string(),
            numbers: "numbers".to_string(),
            name_list: "candidate-name-list".to_string(),
            square_list: "candidate-square-list".to_string(),
            picture_list: "candidate-picture-list".to_string(),
            vote_list: "candidate-vote-list".to_string(),
            bar: "bar".to_string(),
        }
    }
}

/// Candidate name labels
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NameStyle {
    /// Vertical distance between consecutive name rows
    pub row_height: i64,
    pub font_family: String,
    pub font_size: i64,
    pub font_weight: String,
    /// Initial offset of the name list group, tuned to the base map
    pub origin: (i64, i64),
}

impl Default for NameStyle {
    fn default() -> Self {
        Self {
            row_height: 30,
            font_family: "sans-serif".to_string(),
            font_size: 24,
            font_weight: "bold".to_string(),
            origin: (50, 48),
        }
    }
}

/// Candidate color swatches
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SquareStyle {
    /// Vertical distance between consecutive swatch rows
    pub row_height: i64,
    pub width: i64,
    pub height: i64,
    pub stroke: Color,
    pub stroke_width: i64,
    /// Initial offset of the swatch list group, tuned to the base map
    pub origin: (i64, i64),
}

impl Default for SquareStyle {
    fn default() -> Self {
        Self {
            row_height: 30,
            width: 20,
            height: 20,
            stroke: Color::new(0x000000),
            stroke_width: 1,
            origin: (20, 30),
        }
    }
}

/// Candidate portrait images and their colored borders
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PortraitStyle {
    pub width: i64,
    pub height: i64,
    /// Horizontal gap between adjacent portraits
    pub gap: i64,
    /// Vertical margin between the map body and the portrait row
    pub top_margin: i64,
    pub stroke_width: i64,
    /// Image reference used when a candidate has no portrait of their own
    pub default_href: String,
}

impl Default for PortraitStyle {
    fn default() -> Self {
        Self {
            width: 50,
            height: 60,
            gap: 10,
            top_margin: 12,
            stroke_width: 3,
            default_href: "portraits/default.png".to_string(),
        }
    }
}

/// Candidate vote-count labels
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VoteStyle {
    /// Vertical distance between the portrait row and the vote labels
    pub drop: i64,
    /// Blank space kept below the vote labels
    pub bottom_margin: i64,
    pub font_family: String,
    pub font_size: i64,
    pub font_weight: String,
    pub stroke: Color,
    pub stroke_width: i64,
    pub anchor: String,
}

impl Default for VoteStyle {
    fn default() -> Self {
        Self {
            drop: 20,
            bottom_margin: 12,
            font_family: "sans-serif".to_string(),
            font_size: 20,
            font_weight: "bold".to_string(),
            stroke: Color::new(0x000000),
            stroke_width: 0,
            anchor: "middle".to_string(),
        }
    }
}

/// The proportional vote bar
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BarStyle {
    pub width: i64,
    pub height: i64,
    /// Neutral color of the blank bar and the indicator triangles
    pub color: Color,
    pub label_font_family: String,
    pub label_font_size: i64,
    pub label_font_weight: String,
    pub label_anchor: String,
    pub label_color: Color,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            width: 600,
            height: 30,
            color: Color::new(0xc8c8c8),
            label_font_family: "sans-serif".to_string(),
            label_font_size: 20,
            label_font_weight: "bold".to_string(),
            label_anchor: "middle".to_string(),
            label_color: Color::new(0xffffff),
        }
    }
}

/// The two directional indicator triangles above and below the bar
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TriangleStyle {
    pub width: i64,
    pub height: i64,
    /// Gap between a triangle's tip and the bar edge
    pub drop: i64,
}

impl Default for TriangleStyle {
    fn default() -> Self {
        Self {
            width: 20,
            height: 12,
            drop: 4,
        }
    }
}

/// The map title
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TitleStyle {
    pub font_family: String,
    pub font_size: i64,
    pub font_weight: String,
    pub anchor: String,
}

impl Default for TitleStyle {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 40,
            font_weight: "bold".to_string(),
            anchor: "middle".to_string(),
        }
    }
}

/// Vertical spacing of the election chrome added above the map body
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChromeSpacing {
    /// Document top edge to title baseline
    pub top_to_title: i64,
    /// Title baseline to bar top
    pub title_to_bar: i64,
    /// Bar bottom to map body top
    pub bar_to_map: i64,
}

impl Default for ChromeSpacing {
    fn default() -> Self {
        Self {
            top_to_title: 50,
            title_to_bar: 25,
            bar_to_map: 40,
        }
    }
}

impl ChromeSpacing {
    /// Total vertical extent the chrome adds above the map body, including
    /// the bar and its upper triangle.
    pub fn extent(&self, bar: &BarStyle, triangles: &TriangleStyle) -> i64 {
        self.top_to_title + self.title_to_bar + self.bar_to_map + bar.height + triangles.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let config = MapConfig::default();
        assert_eq!(config.roster.max_candidates, 8);
        assert_eq!(config.roster.switch_threshold, 5);
        assert_eq!(config.portraits.width, 50);
        assert_eq!(config.portraits.gap, 10);
    }

    #[test]
    fn test_partial_toml_overrides_keep_defaults() {
        let config = MapConfig::from_str(
            r#"
            [roster]
            max_candidates = 4

            [bar]
            width = 200
            "#,
        )
        .unwrap();
        assert_eq!(config.roster.max_candidates, 4);
        assert_eq!(config.roster.switch_threshold, 5);
        assert_eq!(config.bar.width, 200);
        assert_eq!(config.bar.height, 30);
    }

    #[test]
    fn test_color_fields_parse_from_hex() {
        let config = MapConfig::from_str(
            r##"
            [bar]
            color = "#123456"
            "##,
        )
        .unwrap();
        assert_eq!(config.bar.color, Color::new(0x123456));
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(MapConfig::from_str("[bar]\ncolor = \"nope\"").is_err());
    }

    #[test]
    fn test_chrome_extent() {
        let config = MapConfig::default();
        let extent = config.chrome.extent(&config.bar, &config.triangles);
        assert_eq!(extent, 50 + 25 + 40 + 30 + 12);
    }
}
