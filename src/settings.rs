//! Player preferences
//!
//! Only the cosmetic theme for now. Persisted separately from the high score.

use serde::{Deserialize, Serialize};

use crate::consts::SETTINGS_KEY;
use crate::platform::ScoreStore;

/// Cosmetic theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Classic,
    Ocean,
    Forest,
    Sunset,
    Midnight,
}

/// What the view needs to draw a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeStyle {
    /// Background of a held die
    pub held_color: &'static str,
    /// Stylesheet swapped into the page
    pub stylesheet: &'static str,
}

/// Background of an unheld die, shared by every theme
pub const UNHELD_COLOR: &str = "#ffffff";

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Classic,
        Theme::Ocean,
        Theme::Forest,
        Theme::Sunset,
        Theme::Midnight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Classic => "Classic",
            Theme::Ocean => "Ocean",
            Theme::Forest => "Forest",
            Theme::Sunset => "Sunset",
            Theme::Midnight => "Midnight",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Some(Theme::Classic),
            "ocean" => Some(Theme::Ocean),
            "forest" => Some(Theme::Forest),
            "sunset" => Some(Theme::Sunset),
            "midnight" => Some(Theme::Midnight),
            _ => None,
        }
    }

    pub fn style(&self) -> ThemeStyle {
        match self {
            Theme::Classic => ThemeStyle {
                held_color: "#59e391",
                stylesheet: "styles/classic.css",
            },
            Theme::Ocean => ThemeStyle {
                held_color: "#4fc3f7",
                stylesheet: "styles/ocean.css",
            },
            Theme::Forest => ThemeStyle {
                held_color: "#8bc34a",
                stylesheet: "styles/forest.css",
            },
            Theme::Sunset => ThemeStyle {
                held_color: "#ffab40",
                stylesheet: "styles/sunset.css",
            },
            Theme::Midnight => ThemeStyle {
                held_color: "#9575cd",
                stylesheet: "styles/midnight.css",
            },
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,
}

impl Settings {
    /// Load settings, using defaults when missing or corrupt
    pub fn load(store: &impl ScoreStore) -> Self {
        match store.get_item(SETTINGS_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from storage");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring corrupt settings: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read settings: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, store: &mut impl ScoreStore) {
        match serde_json::to_string(self) {
            Ok(json) => match store.set_item(SETTINGS_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Could not save settings: {}", e),
            },
            Err(e) => log::warn!("Could not encode settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_theme_labels_parse_back() {
        for theme in Theme::ALL {
            assert_eq!(Theme::from_str(theme.as_str()), Some(theme));
        }
        assert_eq!(Theme::from_str(" OCEAN "), Some(Theme::Ocean));
        assert_eq!(Theme::from_str("neon"), None);
    }

    #[test]
    fn test_styles_are_distinct() {
        for (i, a) in Theme::ALL.iter().enumerate() {
            for b in &Theme::ALL[i + 1..] {
                assert_ne!(a.style().held_color, b.style().held_color);
                assert_ne!(a.style().stylesheet, b.style().stylesheet);
            }
            assert_ne!(a.style().held_color, UNHELD_COLOR);
        }
    }

    #[test]
    fn test_settings_persist() {
        let mut store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());

        let settings = Settings {
            theme: Theme::Midnight,
        };
        settings.save(&mut store);
        assert_eq!(Settings::load(&store).theme, Theme::Midnight);
    }

    #[test]
    fn test_corrupt_settings_use_defaults() {
        let store = MemoryStore::new().with_item(SETTINGS_KEY, "{not json");
        assert_eq!(Settings::load(&store), Settings::default());

        let store = MemoryStore::new().with_item(SETTINGS_KEY, r#"{"theme":"Neon"}"#);
        assert_eq!(Settings::load(&store), Settings::default());

        let store = MemoryStore::new().with_item(SETTINGS_KEY, "{}");
        assert_eq!(Settings::load(&store).theme, Theme::Classic);
    }
}
