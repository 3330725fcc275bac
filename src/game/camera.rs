//! 2D Camera and World/Screen Transform
//!
//! Maps Y-up world coordinates into Y-down screen pixels. The projection is
//! a pure function: world position relative to the camera, scaled by
//! pixels-per-unit and zoom, centered on the viewport, with the sprite pivot
//! subtracted from the top-left corner.

use macroquad::prelude::*;

/// The active view into the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// World position the viewport is centered on
    pub world_position: Vec2,
    /// Zoom factor; 1.0 = pixels_per_unit pixels per world unit
    pub zoom: f32,
    /// Pixels one world unit occupies at zoom 1.0
    pub pixels_per_unit: f32,
    /// Viewport size in pixels
    pub viewport: Vec2,
}

impl Camera {
    pub fn new(pixels_per_unit: f32, viewport: Vec2) -> Self {
        Self {
            world_position: Vec2::ZERO,
            zoom: 1.0,
            pixels_per_unit,
            viewport,
        }
    }

    /// Effective pixels per world unit at the current zoom
    pub fn pixel_scale(&self) -> f32 {
        self.pixels_per_unit * self.zoom
    }

    /// Project an entity's world transform into a screen-space destination
    /// rectangle.
    ///
    /// `scale` is the entity size in world units, `pivot` the fraction of
    /// the rendered rectangle subtracted from its top-left corner. The Y
    /// axis flips because world up is +Y while screen space grows downward.
    ///
    /// Stateless and total: zoom or scale of zero produces a zero-area
    /// rectangle, negative values mirror the sprite. Neither is rejected;
    /// they render nothing visible or a flipped image.
    pub fn world_to_screen(&self, position: Vec2, scale: Vec2, pivot: Vec2) -> Rect {
        let relative = position - self.world_position;
        let pixel_scale = self.pixel_scale();

        let w = pixel_scale * scale.x;
        let h = pixel_scale * scale.y;

        let x = self.viewport.x * 0.5 + relative.x * pixel_scale - w * pivot.x;
        let y = self.viewport.y * 0.5 - relative.y * pixel_scale - h * pivot.y;

        Rect::new(x, y, w, h)
    }

    /// Inverse of [`world_to_screen`](Self::world_to_screen) for a point:
    /// screen pixels back into world coordinates.
    ///
    /// Zoom may legally sit at exactly zero; there the projection collapses
    /// the whole world onto the viewport center, so the inverse maps every
    /// point back to the camera position instead of dividing by zero.
    pub fn screen_to_world(&self, point: Vec2) -> Vec2 {
        let pixel_scale = self.pixel_scale();
        if pixel_scale == 0.0 {
            return self.world_position;
        }
        let centered = point - self.viewport * 0.5;
        self.world_position + vec2(centered.x / pixel_scale, -centered.y / pixel_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera() -> Camera {
        Camera::new(64.0, vec2(800.0, 600.0))
    }

    #[test]
    fn test_unit_offset_on_x() {
        let camera = test_camera();
        let rect = camera.world_to_screen(vec2(1.0, 0.0), Vec2::ONE, Vec2::ZERO);
        // 400 + 1*64*1 - 0 = 464, 300 - 0 - 0 = 300
        assert_eq!(rect.x, 464.0);
        assert_eq!(rect.y, 300.0);
        assert_eq!(rect.w, 64.0);
        assert_eq!(rect.h, 64.0);
    }

    #[test]
    fn test_y_axis_inverted() {
        let camera = test_camera();
        let rect = camera.world_to_screen(vec2(0.0, 1.0), Vec2::ONE, Vec2::ZERO);
        // World up moves the rectangle up the screen: 300 - 64 = 236
        assert_eq!(rect.x, 400.0);
        assert_eq!(rect.y, 236.0);
    }

    #[test]
    fn test_linear_in_zoom() {
        let mut camera = test_camera();
        let base = camera.world_to_screen(vec2(1.0, 0.0), Vec2::ONE, Vec2::ZERO);

        camera.zoom = 2.0;
        let zoomed = camera.world_to_screen(vec2(1.0, 0.0), Vec2::ONE, Vec2::ZERO);

        // Doubling zoom doubles both the pixel offset from center and the size
        assert_eq!(zoomed.x - 400.0, (base.x - 400.0) * 2.0);
        assert_eq!(zoomed.w, base.w * 2.0);
        assert_eq!(zoomed.h, base.h * 2.0);
    }

    #[test]
    fn test_pivot_shifts_rectangle() {
        let camera = test_camera();
        let anchored = camera.world_to_screen(Vec2::ZERO, Vec2::ONE, vec2(0.5, 0.5));
        // Centered pivot pulls the rect back by half its size on both axes
        assert_eq!(anchored.x, 400.0 - 32.0);
        assert_eq!(anchored.y, 300.0 - 32.0);
    }

    #[test]
    fn test_camera_position_is_subtracted() {
        let mut camera = test_camera();
        camera.world_position = vec2(1.0, 0.0);
        let rect = camera.world_to_screen(vec2(1.0, 0.0), Vec2::ONE, Vec2::ZERO);
        // Entity at the camera position sits at the viewport center
        assert_eq!(rect.x, 400.0);
        assert_eq!(rect.y, 300.0);
    }

    #[test]
    fn test_negative_zoom_mirrors() {
        let mut camera = test_camera();
        camera.zoom = -1.0;
        let rect = camera.world_to_screen(vec2(1.0, 0.0), Vec2::ONE, Vec2::ZERO);
        // Not rejected: the projection mirrors instead
        assert_eq!(rect.w, -64.0);
        assert_eq!(rect.x, 400.0 - 64.0);
    }

    #[test]
    fn test_screen_to_world_round_trip() {
        let mut camera = test_camera();
        camera.world_position = vec2(3.5, -2.0);
        camera.zoom = 1.5;

        let world = vec2(5.25, 1.75);
        let rect = camera.world_to_screen(world, Vec2::ONE, Vec2::ZERO);
        let back = camera.screen_to_world(vec2(rect.x, rect.y));
        assert!((back.x - world.x).abs() < 0.0001);
        assert!((back.y - world.y).abs() < 0.0001);
    }

    #[test]
    fn test_screen_to_world_at_zero_zoom_collapses_to_camera() {
        let mut camera = test_camera();
        camera.zoom = 0.0;
        camera.world_position = vec2(2.0, 3.0);
        // No division by zero, no NaN: every point maps to the camera
        assert_eq!(camera.screen_to_world(vec2(123.0, 456.0)), vec2(2.0, 3.0));
    }

    #[test]
    fn test_screen_center_maps_to_camera_position() {
        let mut camera = test_camera();
        camera.world_position = vec2(7.0, 9.0);
        let world = camera.screen_to_world(vec2(400.0, 300.0));
        assert_eq!(world, vec2(7.0, 9.0));
    }
}
