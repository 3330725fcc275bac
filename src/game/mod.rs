//! Game Foundation Module
//!
//! The reusable core of the engine plus the demo scene built on it:
//! - EntityPool: fixed-capacity storage with O(1) swap-remove deletion and
//!   generation-counted handles
//! - Camera: pure world-to-screen projection (and its inverse)
//! - Entity/Transform/Sprite: plain per-slot data
//! - Stage: the frame-stepped demo scene
//!
//! Design philosophy:
//! - No per-frame heap allocation in the entity path
//! - Stale references detected, never silently aliased
//! - Pure, unit-testable math at the seams

pub mod camera;
pub mod entity;
pub mod pool;
pub mod sprite;
pub mod stage;
pub mod transform;

// Re-export main types
pub use camera::Camera;
pub use entity::{Entity, EntityKind};
pub use pool::{EntityId, EntityPool, PoolError, Relocation};
pub use sprite::Sprite;
pub use stage::Stage;
pub use transform::Transform;
