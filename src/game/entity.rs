//! Entity Record
//!
//! The plain data stored per pool slot: a kind tag plus the components every
//! entity carries. No component lookup indirection - at this scale an
//! array-of-structs is simpler and cache-friendly.

use macroquad::prelude::*;

use super::sprite::Sprite;
use super::transform::Transform;

/// What an entity is, for per-kind update logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntityKind {
    /// Static backdrop covering the viewport
    #[default]
    Background,
    /// The player-controlled entity
    Player,
    /// Short-lived projectile, destroyed once it leaves the world bounds
    Projectile,
    /// Falling hazard; shot down by projectiles, respawned on a timer
    Asteroid,
}

/// A game entity as stored in the pool.
///
/// Created by [`EntityPool::create`](super::pool::EntityPool::create),
/// mutated in place each tick, destroyed by swap-remove. The pool hands out
/// slots without resetting them, so spawning code must populate every field
/// it relies on.
#[derive(Debug, Clone, Default)]
pub struct Entity {
    pub kind: EntityKind,
    pub transform: Transform,
    pub sprite: Sprite,
    /// Velocity in world units per second, integrated each tick
    pub velocity: Vec2,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_entity() {
        let entity = Entity::default();
        assert_eq!(entity.kind, EntityKind::Background);
        assert_eq!(entity.transform, Transform::IDENTITY);
        assert_eq!(entity.velocity, Vec2::ZERO);
    }
}
