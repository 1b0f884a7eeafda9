//! Player preferences
//!
//! Persisted in LocalStorage on the web. Scores are never stored.

use serde::{Deserialize, Serialize};

use crate::sim::Input;

/// Audio and key binding preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Background track volume (0.0 - 1.0)
    pub volume: f32,
    pub muted: bool,

    // === Controls ===
    /// `KeyboardEvent.code` that makes the plane jump
    pub jump_key: String,
    /// `KeyboardEvent.code` that fires a projectile
    pub fire_key: String,
    /// `KeyboardEvent.code` that toggles the music
    pub mute_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            volume: 0.8,
            muted: false,
            jump_key: "Space".to_string(),
            fire_key: "KeyF".to_string(),
            mute_key: "KeyM".to_string(),
        }
    }
}

impl Settings {
    /// Map a key code to the input it is bound to
    pub fn action_for_key(&self, code: &str) -> Option<Input> {
        if code == self.jump_key {
            Some(Input::Jump)
        } else if code == self.fire_key {
            Some(Input::Fire)
        } else {
            None
        }
    }

    /// Flip the mute flag and return the new value
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Volume after applying mute
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume.clamp(0.0, 1.0)
        }
    }

    /// LocalStorage key
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    const STORAGE_KEY: &'static str = "plane_dodge_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
                log::warn!("Ignoring unreadable settings in LocalStorage");
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let settings = Settings::default();
        assert_eq!(settings.action_for_key("Space"), Some(Input::Jump));
        assert_eq!(settings.action_for_key("KeyF"), Some(Input::Fire));
        assert_eq!(settings.action_for_key("KeyQ"), None);
    }

    #[test]
    fn test_rebound_keys() {
        let settings: Settings =
            serde_json::from_str(r#"{ "jump_key": "ArrowUp" }"#).expect("valid settings");
        assert_eq!(settings.action_for_key("ArrowUp"), Some(Input::Jump));
        assert_eq!(settings.action_for_key("Space"), None);
        assert_eq!(settings.fire_key, "KeyF");
    }

    #[test]
    fn test_toggle_mute() {
        let mut settings = Settings::default();
        assert_eq!(settings.action_for_key("KeyM"), None);
        assert!(settings.toggle_mute());
        assert_eq!(settings.effective_volume(), 0.0);
        assert!(!settings.toggle_mute());
        assert_eq!(settings.effective_volume(), 0.8);
    }

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings {
            volume: 1.7,
            ..Settings::default()
        };
        assert_eq!(settings.effective_volume(), 1.0);
        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
    }
}
