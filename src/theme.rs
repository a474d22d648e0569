use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Light/dark preference, threaded explicitly from `App` into the render
/// layer and persisted in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggle(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Dark => Palette {
                fg: Color::White,
                dim: Color::DarkGray,
                accent: Color::Cyan,
                highlight: Color::Blue,
                up: Color::Green,
                down: Color::Red,
                error_fg: Color::White,
                error_bg: Color::Red,
                header_bg: Color::DarkGray,
            },
            Theme::Light => Palette {
                fg: Color::Black,
                dim: Color::Gray,
                accent: Color::Blue,
                highlight: Color::LightBlue,
                up: Color::Green,
                down: Color::Red,
                error_fg: Color::Red,
                error_bg: Color::LightRed,
                header_bg: Color::Gray,
            },
        }
    }
}

/// Resolved colors for the active theme. Error messages get a distinct
/// background so they stand out in the transcript.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub fg: Color,
    pub dim: Color,
    pub accent: Color,
    pub highlight: Color,
    pub up: Color,
    pub down: Color,
    pub error_fg: Color,
    pub error_bg: Color,
    pub header_bg: Color,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_both_ways() {
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        let theme: Theme = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(theme, Theme::Light);
    }
}
