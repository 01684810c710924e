use bevy::color::{HexColorError, Srgba};
use bevy::prelude::*;
use constants::board::{DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use constants::render_settings::{DEFAULT_COLOR_1, DEFAULT_COLOR_2};
use serde::Deserialize;
use std::fmt;

/// Live board configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    pub size: u32,
    pub color1: Srgba,
    pub color2: Srgba,
    pub show_labels: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            color1: default_color(DEFAULT_COLOR_1),
            color2: default_color(DEFAULT_COLOR_2),
            show_labels: false,
        }
    }
}

impl BoardConfig {
    /// Tile colour for a cell given its checkerboard parity.
    pub fn tile_color(&self, dark: bool) -> Srgba {
        if dark { self.color2 } else { self.color1 }
    }

    /// Label colour: the opposite tile colour, so text stays legible.
    pub fn label_color(&self, dark: bool) -> Srgba {
        if dark { self.color1 } else { self.color2 }
    }
}

/// Clamp a requested board size into the supported range.
pub fn clamp_board_size(size: u32) -> u32 {
    size.clamp(MIN_BOARD_SIZE, MAX_BOARD_SIZE)
}

fn default_color(hex: &str) -> Srgba {
    Srgba::hex(hex).unwrap_or(Srgba::WHITE)
}

/// Errors raised while turning user-supplied settings into a [`BoardConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    InvalidColor { field: &'static str, value: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColor { field, value } => {
                write!(f, "invalid colour for '{field}': '{value}'")
            }
        }
    }
}

impl std::error::Error for SettingsError {}

/// Parse a `#rrggbb`/`#rgb` hex colour.
pub fn parse_color(field: &'static str, value: &str) -> Result<Srgba, SettingsError> {
    Srgba::hex(value).map_err(|_: HexColorError| SettingsError::InvalidColor {
        field,
        value: value.to_string(),
    })
}

/// Startup settings file (`assets/board.settings.json`). Every field is optional.
#[derive(Asset, TypePath, Debug, Clone, Default, Deserialize)]
pub struct BoardSettings {
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default)]
    pub color1: Option<String>,
    #[serde(default)]
    pub color2: Option<String>,
    #[serde(default)]
    pub show_labels: Option<bool>,
}

impl BoardSettings {
    /// Resolve against the defaults. Sizes are clamped, colours must parse.
    pub fn to_config(&self) -> Result<BoardConfig, SettingsError> {
        let mut config = BoardConfig::default();

        if let Some(size) = self.size {
            config.size = clamp_board_size(size);
        }
        if let Some(ref hex) = self.color1 {
            config.color1 = parse_color("color1", hex)?;
        }
        if let Some(ref hex) = self.color2 {
            config.color2 = parse_color("color2", hex)?;
        }
        if let Some(show) = self.show_labels {
            config.show_labels = show;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_settings_resolve_to_defaults() {
        let settings: BoardSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.to_config().unwrap(), BoardConfig::default());
    }

    #[test]
    fn settings_override_and_clamp() {
        let settings: BoardSettings = serde_json::from_str(
            r##"{ "size": 42, "color1": "#ffffff", "show_labels": true }"##,
        )
        .unwrap();
        let config = settings.to_config().unwrap();

        assert_eq!(config.size, MAX_BOARD_SIZE);
        assert_eq!(config.color1, Srgba::WHITE);
        assert_eq!(config.color2, BoardConfig::default().color2);
        assert!(config.show_labels);
    }

    #[test]
    fn invalid_colour_is_reported_with_field_name() {
        let settings = BoardSettings {
            color2: Some("not-a-colour".into()),
            ..default()
        };
        let err = settings.to_config().unwrap_err();
        assert_eq!(
            err,
            SettingsError::InvalidColor {
                field: "color2",
                value: "not-a-colour".into()
            }
        );
        assert!(err.to_string().contains("color2"));
    }

    #[test]
    fn size_clamps_to_supported_range() {
        assert_eq!(clamp_board_size(0), MIN_BOARD_SIZE);
        assert_eq!(clamp_board_size(12), 12);
        assert_eq!(clamp_board_size(99), MAX_BOARD_SIZE);
    }

    #[test]
    fn label_colour_is_opposite_of_tile_colour() {
        let config = BoardConfig::default();
        assert_eq!(config.tile_color(true), config.label_color(false));
        assert_eq!(config.tile_color(false), config.label_color(true));
    }
}
