//! Game settings
//!
//! Read from JSON. Every field has a default, so a partial file (or `{}`)
//! is valid.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; `None` picks one from the clock
    pub seed: Option<u64>,
    /// Ticks per second
    pub tick_rate: u32,
    /// Diameter of the player, the coin and each enemy
    pub entity_dimension: f32,
    /// Coin and enemy spawns keep this many pixels from every edge
    pub spawn_margin: i32,

    // === Audio ===
    pub coin_volume: f32,
    pub bark_volume: f32,
    /// Start with sound off (browsers block autoplay anyway)
    pub start_muted: bool,

    // === Native headless run ===
    /// Viewport used when there is no window
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Ticks to simulate before exiting
    pub run_ticks: u64,
    /// Sleep between ticks to run at wall-clock speed
    pub realtime: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            tick_rate: TICK_RATE,
            entity_dimension: ENTITY_DIMENSION,
            spawn_margin: SPAWN_MARGIN,

            coin_volume: COIN_VOLUME,
            bark_volume: BARK_VOLUME,
            start_muted: true,

            viewport_width: 800.0,
            viewport_height: 600.0,
            run_ticks: 600,
            realtime: true,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.clamp_volumes();
        Ok(settings)
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    fn clamp_volumes(&mut self) {
        self.coin_volume = self.coin_volume.clamp(0.0, 1.0);
        self.bark_volume = self.bark_volume.clamp(0.0, 1.0);
    }
}
