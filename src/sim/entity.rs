//! Drawable circular entities: the player, the coin and the enemies

use glam::Vec2;
use rand::Rng;

use super::collision::Circle;
use super::math::{distance, negation, random_enemy_speed, random_int_from_range};
use super::state::{Mouse, Viewport};
use crate::error::{OctovoltError, Result};

/// Opaque sprite handle; the platform maps it to an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Player,
    Coin,
    EnemyLeft,
    EnemyRight,
}

impl Sprite {
    pub const ALL: [Sprite; 4] = [
        Sprite::Player,
        Sprite::Coin,
        Sprite::EnemyLeft,
        Sprite::EnemyRight,
    ];

    /// DOM id of the `<img>` holding this sprite
    pub fn element_id(&self) -> &'static str {
        match self {
            Sprite::Player => "octovolt",
            Sprite::Coin => "coin",
            Sprite::EnemyLeft => "enemy",
            Sprite::EnemyRight => "enemyR",
        }
    }
}

/// Reject non-positive or non-finite diameters
pub fn validate_dimension(dimension: f32) -> Result<f32> {
    if dimension.is_finite() && dimension > 0.0 {
        Ok(dimension)
    } else {
        Err(OctovoltError::InvalidDimension(dimension))
    }
}

/// Uniform integer point inside the viewport, `margin` away from each edge
pub fn random_spawn_point<R: Rng>(viewport: &Viewport, margin: i32, rng: &mut R) -> Vec2 {
    let x = random_int_from_range(rng, margin, viewport.width() as i32 - margin);
    let y = random_int_from_range(rng, margin, viewport.height() as i32 - margin);
    Vec2::new(x as f32, y as f32)
}

/// The pointer-controlled sprite
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub dimension: f32,
    pub sprite: Sprite,
}

impl Player {
    pub fn new(pos: Vec2, dimension: f32) -> Result<Self> {
        Ok(Self {
            pos,
            dimension: validate_dimension(dimension)?,
            sprite: Sprite::Player,
        })
    }

    /// Snap to the pointer (no smoothing)
    pub fn move_with_mouse(&mut self, mouse: &Mouse) {
        self.pos = mouse.pos;
    }
}

impl Circle for Player {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn dimension(&self) -> f32 {
        self.dimension
    }
}

/// The collectible; never destroyed, only moved
#[derive(Debug, Clone)]
pub struct Coin {
    pub pos: Vec2,
    pub dimension: f32,
    pub sprite: Sprite,
}

impl Coin {
    pub fn new(pos: Vec2, dimension: f32) -> Result<Self> {
        Ok(Self {
            pos,
            dimension: validate_dimension(dimension)?,
            sprite: Sprite::Coin,
        })
    }

    pub fn respawn<R: Rng>(&mut self, viewport: &Viewport, margin: i32, rng: &mut R) {
        self.pos = random_spawn_point(viewport, margin, rng);
    }
}

impl Circle for Coin {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn dimension(&self) -> f32 {
        self.dimension
    }
}

/// A bouncing dog
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub dimension: f32,
    pub sprite: Sprite,
}

impl Enemy {
    /// Both velocity axes start at `speed`, so enemies move diagonally
    pub fn new(pos: Vec2, dimension: f32, speed: i32) -> Result<Self> {
        Ok(Self::with_speed(pos, validate_dimension(dimension)?, speed))
    }

    /// Random position and speed
    pub fn spawn<R: Rng>(
        viewport: &Viewport,
        margin: i32,
        rng: &mut R,
        dimension: f32,
    ) -> Result<Self> {
        Ok(Self::spawn_validated(viewport, margin, rng, validate_dimension(dimension)?))
    }

    /// `dimension` must already have passed `validate_dimension`
    pub(crate) fn with_speed(pos: Vec2, dimension: f32, speed: i32) -> Self {
        Self {
            pos,
            vel: Vec2::splat(speed as f32),
            dimension,
            sprite: Sprite::EnemyLeft,
        }
    }

    pub(crate) fn spawn_validated<R: Rng>(
        viewport: &Viewport,
        margin: i32,
        rng: &mut R,
        dimension: f32,
    ) -> Self {
        let pos = random_spawn_point(viewport, margin, rng);
        let speed = random_enemy_speed(rng);
        Self::with_speed(pos, dimension, speed)
    }

    /// position += velocity
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Flip velocity axes near the viewport edges.
    ///
    /// Edge distances are measured to a point on the far edges (bottom, right)
    /// and the near-edge distances are derived by subtracting the viewport
    /// size. Both checks on an axis run, so an enemy in a viewport smaller
    /// than itself can flip twice in one frame and keep its direction.
    pub fn bounce(&mut self, viewport: &Viewport) {
        let (w, h) = (viewport.width(), viewport.height());

        let from_bottom = distance(self.pos, Vec2::new(self.pos.x, h));
        let from_top = from_bottom - h;
        let from_right = distance(self.pos, Vec2::new(w, self.pos.y));
        let from_left = from_right - w;

        if from_bottom <= self.dimension {
            self.vel.y = negation(self.vel.y);
        }
        if from_top > 0.0 {
            self.vel.y = negation(self.vel.y);
        }
        if from_left > 0.0 {
            self.vel.x = negation(self.vel.x);
        }
        if from_right <= self.dimension {
            self.vel.x = negation(self.vel.x);
        }
    }

    /// Face the direction of horizontal travel
    pub fn switch_sprite(&mut self) {
        self.sprite = if self.vel.x < 0.0 {
            Sprite::EnemyLeft
        } else {
            Sprite::EnemyRight
        };
    }
}

impl Circle for Enemy {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn dimension(&self) -> f32 {
        self.dimension
    }
}
