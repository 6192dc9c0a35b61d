//! User preferences, stored apart from the setup snapshot.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use serde::{Deserialize, Serialize};

/// Color theme. Cycles in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    HighContrast,
    Colorblind,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Dark, Theme::Light, Theme::HighContrast, Theme::Colorblind];

    /// The theme after this one, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::HighContrast,
            Self::HighContrast => Self::Colorblind,
            Self::Colorblind => Self::Dark,
        }
    }

    /// Name used in the settings document and the `data-theme` attribute.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::HighContrast => "high-contrast",
            Self::Colorblind => "colorblind",
        }
    }

    /// Body class for the theme. Dark is the base style and has none.
    #[must_use]
    pub fn body_class(self) -> Option<&'static str> {
        match self {
            Self::Dark => None,
            Self::Light => Some("light-theme"),
            Self::HighContrast => Some("high-contrast-theme"),
            Self::Colorblind => Some("colorblind-theme"),
        }
    }

    /// Glyph shown on the theme toggle.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Dark => "\u{1F319}",
            Self::Light => "\u{2600}\u{FE0F}",
            Self::HighContrast => "\u{1F506}",
            Self::Colorblind => "\u{1F3A8}",
        }
    }

    /// Court line color for this theme.
    #[must_use]
    pub fn line_color(self) -> &'static str {
        match self {
            Self::Dark | Self::Light | Self::Colorblind => "#000000",
            Self::HighContrast => "#FFFFFF",
        }
    }
}

/// Settings document. Missing fields take their defaults when loaded.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub theme: Theme,
    pub auto_save: bool,
    pub show_labels: bool,
    pub snap_to_grid: bool,
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            auto_save: true,
            show_labels: true,
            snap_to_grid: false,
            sound_enabled: false,
        }
    }
}

impl Settings {
    /// Parse a stored settings document over the defaults. Anything unreadable
    /// yields the defaults.
    #[must_use]
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("settings unreadable, using defaults: {e}");
                Self::default()
            }
        }
    }
}
