//! Simulation module
//!
//! All gameplay logic lives here. No rendering, audio or DOM:
//! - One tick per frame, fixed order (player, coin, enemies)
//! - Seeded RNG only
//! - Side effects leave as `GameEvent`s for the host to act on

pub mod collision;
pub mod entity;
pub mod math;
pub mod state;
pub mod tick;

pub use collision::{Circle, collide, overlaps};
pub use entity::{Coin, Enemy, Player, Sprite};
pub use state::{
    GameState, InputEvent, Mouse, Score, Sound, SoundEffect, SoundIcon, UiUpdate, Viewport,
};
pub use tick::{GameEvent, TickEvents, tick};
