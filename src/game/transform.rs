//! 2D Transform Component
//!
//! Position and scale in world units. World space is Y-up; the camera is
//! responsible for flipping into screen space at render time.
//!
//! Kept as a small value type with explicit update helpers rather than
//! scattering field-by-field resets across init/reset code.

use macroquad::prelude::*;

/// World-space position and scale of an entity.
///
/// No rotation: the source material renders axis-aligned rectangles only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position in world units
    pub position: Vec2,
    /// Size in world units (1.0 = one world unit per sprite cell)
    pub scale: Vec2,
}

impl Transform {
    /// Identity transform (origin, unit scale)
    pub const IDENTITY: Transform = Transform {
        position: Vec2::ZERO,
        scale: Vec2::ONE,
    };

    /// Create a transform at a position with unit scale
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            scale: Vec2::ONE,
        }
    }

    /// Create a transform at a position with an explicit scale
    pub fn new(position: Vec2, scale: Vec2) -> Self {
        Self { position, scale }
    }

    /// Builder-style scale override
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Translate by an offset in world units
    pub fn translate(&mut self, offset: Vec2) {
        self.position += offset;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_default() {
        let t = Transform::default();
        assert_eq!(t.position, Vec2::ZERO);
        assert_eq!(t.scale, Vec2::ONE);
    }

    #[test]
    fn test_translate() {
        let mut t = Transform::from_position(vec2(1.0, 2.0));
        t.translate(vec2(0.5, -1.0));
        assert!((t.position.x - 1.5).abs() < 0.001);
        assert!((t.position.y - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_with_scale() {
        let t = Transform::from_position(Vec2::ZERO).with_scale(vec2(3.0, 4.0));
        assert_eq!(t.scale, vec2(3.0, 4.0));
    }
}
