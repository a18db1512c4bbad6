//! Game settings and preferences
//!
//! Persisted as JSON: LocalStorage on the web, a settings file natively.

use serde::{Deserialize, Serialize};

pub use crate::sim::Difficulty;
use crate::sim::GameConfig;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty for new sessions
    pub difficulty: Difficulty,
    /// Fixed RNG seed (random when unset)
    pub seed: Option<u64>,
    /// Whether hosts should play sound cues
    pub sound_enabled: bool,
    /// Demo player accuracy (0.0 - 1.0)
    pub autoplay_skill: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            seed: None,
            sound_enabled: true,
            autoplay_skill: 0.85,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Session configuration for these settings
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            difficulty: self.difficulty,
            ..GameConfig::default()
        }
    }

    /// Demo player skill clamped into range
    pub fn effective_skill(&self) -> f32 {
        if self.autoplay_skill.is_finite() {
            self.autoplay_skill.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "whack_a_robo_settings";

    /// Environment variable naming the native settings file
    pub const PATH_ENV: &'static str = "WHACK_A_ROBO_SETTINGS";
    /// Native settings file used when `PATH_ENV` is unset
    pub const DEFAULT_PATH: &'static str = "whack_a_robo_settings.json";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        match crate::platform::storage_get(Self::STORAGE_KEY).map(|json| Self::from_json(&json)) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            Some(Err(e)) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        match self.to_json() {
            Ok(json) if crate::platform::storage_set(Self::STORAGE_KEY, &json) => log::info!("Settings saved"),
            Ok(_) => log::warn!("LocalStorage unavailable, settings not saved"),
            Err(e) => log::warn!("Could not encode settings: {}", e),
        }
    }

    /// Native settings file path
    #[cfg(not(target_arch = "wasm32"))]
    pub fn path() -> std::path::PathBuf {
        std::env::var_os(Self::PATH_ENV)
            .map(std::path::PathBuf::from)
            .unwrap_or_else(|| std::path::PathBuf::from(Self::DEFAULT_PATH))
    }

    /// Load settings from the native settings file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        self.save_to(&Self::path());
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) {
        match self.to_json() {
            Ok(json) => match std::fs::write(path, json) {
                Ok(()) => log::info!("Settings saved to {}", path.display()),
                Err(e) => log::warn!("Could not save settings to {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Could not encode settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "difficulty": "Nightmare", "seed": 7 }"#).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Nightmare);
        assert_eq!(settings.seed, Some(7));
        assert!(settings.sound_enabled);
        assert_eq!(settings.game_config().difficulty, Difficulty::Nightmare);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Settings::from_json("{ difficulty: ").is_err());
    }

    #[test]
    fn test_effective_skill_clamps() {
        let mut settings = Settings::default();
        settings.autoplay_skill = 3.0;
        assert_eq!(settings.effective_skill(), 1.0);
        settings.autoplay_skill = f32::NAN;
        assert_eq!(settings.effective_skill(), 0.0);
    }

    #[test]
    fn test_file_round_trip_and_fallback() {
        let dir = std::env::temp_dir().join(format!("whack_settings_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");

        let settings = Settings {
            difficulty: Difficulty::Nightmare,
            seed: Some(1234),
            ..Settings::default()
        };
        settings.save_to(&path);
        assert_eq!(Settings::load_from(&path), settings);

        std::fs::write(&path, "not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());

        assert_eq!(Settings::load_from(&dir.join("missing.json")), Settings::default());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
