//! Octovolt - chase the coin, dodge the dogs
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, game state, tick)
//! - `renderer`: Drawing surface seam and the per-frame render pass
//! - `audio`: Coin/bark sound playback
//! - `platform`: Fixed-rate tick scheduling
//! - `settings`: Data-driven configuration

pub mod audio;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{OctovoltError, Result};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation tick rate (one tick per display refresh on a 60 Hz screen)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Diameter shared by the player, the coin and every enemy
    pub const ENTITY_DIMENSION: f32 = 50.0;
    /// Distance kept from each viewport edge when (re)spawning
    pub const SPAWN_MARGIN: i32 = 50;

    /// Enemy speed is sampled from MIN..=MAX, with 0 remapped
    pub const ENEMY_SPEED_MIN: i32 = -5;
    pub const ENEMY_SPEED_MAX: i32 = 4;
    pub const ENEMY_SPEED_ZERO_REMAP: i32 = 5;

    /// Score gained per coin = enemy area / viewport area * SCORE_SCALE
    pub const SCORE_SCALE: f64 = 1000.0;

    /// Playback volumes (coin is deliberately quiet)
    pub const COIN_VOLUME: f32 = 0.07;
    pub const BARK_VOLUME: f32 = 1.0;
}
