//! Surface that records draw calls instead of drawing
//!
//! Backs the native headless run and the renderer tests.

use glam::Vec2;

use super::Surface;
use crate::sim::Sprite;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear { width: f32, height: f32 },
    Sprite { sprite: Sprite, pos: Vec2, dimension: f32 },
}

/// Keeps the calls of the last frame
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
    /// Frames drawn so far
    pub frames: u64,
}

impl RecordingSurface {
    /// Sprites drawn in the last frame, in order
    pub fn sprites(&self) -> impl Iterator<Item = Sprite> + '_ {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Sprite { sprite, .. } => Some(*sprite),
            DrawCall::Clear { .. } => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.calls.clear();
        self.frames += 1;
        self.calls.push(DrawCall::Clear { width, height });
    }

    fn draw_sprite(&mut self, sprite: Sprite, pos: Vec2, dimension: f32) {
        self.calls.push(DrawCall::Sprite {
            sprite,
            pos,
            dimension,
        });
    }
}
