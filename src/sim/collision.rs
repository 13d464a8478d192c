//! Circle-vs-circle collision
//!
//! Every entity is treated as a circle whose diameter is its `dimension`.
//! Touching counts as a hit.

use glam::Vec2;

use super::math::{distance, divide_by_two};

/// Anything with a position and a diameter
pub trait Circle {
    fn position(&self) -> Vec2;
    fn dimension(&self) -> f32;
}

/// True when the two circles touch or overlap
pub fn overlaps<A, B>(a: &A, b: &B) -> bool
where
    A: Circle + ?Sized,
    B: Circle + ?Sized,
{
    let hitbox_a = divide_by_two(a.dimension());
    let hitbox_b = divide_by_two(b.dimension());
    distance(a.position(), b.position()) <= hitbox_a + hitbox_b
}

/// Run `on_hit` iff `a` and `b` collide
pub fn collide<A, B, F>(a: &A, b: &B, on_hit: F)
where
    A: Circle + ?Sized,
    B: Circle + ?Sized,
    F: FnOnce(),
{
    if overlaps(a, b) {
        on_hit();
    }
}
