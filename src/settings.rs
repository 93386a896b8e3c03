//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web. These are preferences only; scores
//! are never saved.

use serde::{Deserialize, Serialize};

use crate::consts::TICK_INTERVAL_MS;

/// Fastest and slowest tick periods accepted
pub const MIN_TICK_INTERVAL_MS: u32 = 1;
pub const MAX_TICK_INTERVAL_MS: u32 = 100;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulation tick period in milliseconds
    pub tick_interval_ms: u32,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// High contrast brick palette
    pub high_contrast: bool,
}

/// Preference the player can flip while the game is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Fps,
    HighContrast,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            show_fps: false,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// Clamp values into their supported ranges
    pub fn sanitized(mut self) -> Self {
        self.tick_interval_ms = self
            .tick_interval_ms
            .clamp(MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS);
        self
    }

    /// Tick period as the simulation clock step
    pub fn tick_ms(&self) -> f64 {
        f64::from(self.tick_interval_ms)
    }

    /// Parse settings JSON, falling back to defaults on malformed input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!("Ignoring malformed settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Flip one preference, returning its new value
    pub fn toggle(&mut self, toggle: Toggle) -> bool {
        let flag = match toggle {
            Toggle::Fps => &mut self.show_fps,
            Toggle::HighContrast => &mut self.high_contrast,
        };
        *flag = !*flag;
        *flag
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "chain_breaker_settings";

    /// Environment override for the native build
    pub const TICK_ENV_VAR: &'static str = "CHAIN_BREAKER_TICK_MS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
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
            match self.to_json() {
                Ok(json) => {
                    if storage.set_item(Self::STORAGE_KEY, &json).is_ok() {
                        log::info!("Settings saved");
                    } else {
                        log::warn!("LocalStorage refused settings");
                    }
                }
                Err(e) => log::warn!("Could not serialize settings: {}", e),
            }
        }
    }

    /// Native: nothing to persist to
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}

    /// Native: defaults, with the tick period overridable from the environment
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let mut settings = Self::default();
        if let Ok(raw) = std::env::var(Self::TICK_ENV_VAR) {
            match raw.trim().parse::<u32>() {
                Ok(ms) => settings.tick_interval_ms = ms,
                Err(e) => log::warn!("Ignoring {}={:?}: {}", Self::TICK_ENV_VAR, raw, e),
            }
        }
        settings.sanitized()
    }
}
