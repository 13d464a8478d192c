//! Rendering module
//!
//! Sprites are blitted to a 2D surface at their position, `dimension` wide
//! and tall. The pass clears first, then draws player, coin and enemies in
//! the same order the tick updates them.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCall, RecordingSurface};

use glam::Vec2;

use crate::sim::{GameState, Sprite};

/// A 2D drawing target
pub trait Surface {
    /// Wipe the whole visible area
    fn clear(&mut self, width: f32, height: f32);

    /// Draw `sprite` with its top-left corner at `pos`
    fn draw_sprite(&mut self, sprite: Sprite, pos: Vec2, dimension: f32);
}

/// Draw one frame of `state`
pub fn render<S: Surface + ?Sized>(state: &GameState, surface: &mut S) {
    surface.clear(state.viewport.width(), state.viewport.height());

    let player = &state.player;
    surface.draw_sprite(player.sprite, player.pos, player.dimension);

    let coin = &state.coin;
    surface.draw_sprite(coin.sprite, coin.pos, coin.dimension);

    for enemy in &state.enemies {
        surface.draw_sprite(enemy.sprite, enemy.pos, enemy.dimension);
    }
}
