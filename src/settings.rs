//! Client settings
//!
//! Persisted in LocalStorage. Gameplay constants live in `consts`.

use serde::{Deserialize, Serialize};

/// Catalogue endpoint used when nothing is stored
pub const DEFAULT_API_URL: &str = "http://localhost:3000/bear";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `GET` endpoint returning the bear list
    pub api_url: String,
    /// Log at debug level in the browser console
    pub verbose_logging: bool,
    /// Fixed RNG seed for reproducible spawns; clock-seeded when unset
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            verbose_logging: false,
            seed: None,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "moving_bears_settings";

    pub fn log_level(&self) -> log::Level {
        if self.verbose_logging {
            log::Level::Debug
        } else {
            log::Level::Info
        }
    }

    /// Parse stored JSON, keeping defaults for missing fields
    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }

    /// JSON written to LocalStorage
    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string_pretty(self).ok()
    }

    /// Load settings from LocalStorage (WASM only).
    ///
    /// On first run nothing is stored yet; the defaults are written back so
    /// the key exists for the user to edit.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match storage.get_item(Self::STORAGE_KEY) {
                Ok(Some(json)) => {
                    if let Some(settings) = Self::from_json(&json) {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    log::warn!("Stored settings unreadable, using defaults");
                }
                Ok(None) => {
                    let settings = Self::default();
                    settings.save();
                    return settings;
                }
                Err(_) => {}
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
            if let Some(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
