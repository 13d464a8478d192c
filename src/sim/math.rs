//! Small geometry and sampling helpers shared by the entities

use glam::Vec2;
use rand::Rng;

use crate::consts::{ENEMY_SPEED_MAX, ENEMY_SPEED_MIN, ENEMY_SPEED_ZERO_REMAP};

/// Euclidean distance between two points
///
/// d = √((x2 - x1)² + (y2 - y1)²)
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

#[inline]
pub fn negation(n: f32) -> f32 {
    -n
}

#[inline]
pub fn divide_by_two(n: f32) -> f32 {
    n / 2.0
}

/// Midpoint of two values
#[inline]
pub fn average(x: f32, y: f32) -> f32 {
    divide_by_two(x + y)
}

/// Uniform integer in `min..=max`
///
/// A collapsed range (viewport narrower than both margins) yields `min`.
pub fn random_int_from_range<R: Rng>(rng: &mut R, min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    rng.random_range(min..=max)
}

/// Enemy speed: uniform over -5..=4 with 0 remapped to 5, so never zero
pub fn random_enemy_speed<R: Rng>(rng: &mut R) -> i32 {
    match random_int_from_range(rng, ENEMY_SPEED_MIN, ENEMY_SPEED_MAX) {
        0 => ENEMY_SPEED_ZERO_REMAP,
        speed => speed,
    }
}
