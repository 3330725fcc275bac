//! Sprite Component
//!
//! A texture reference, the source rectangle inside it (for atlas sheets),
//! and a pivot that anchors the rendered rectangle.
//!
//! The texture is optional: a failed asset load leaves `None` behind and the
//! sprite simply draws nothing. Degraded rendering, not a crash.

use macroquad::prelude::*;

/// Sprite data attached to an entity.
#[derive(Debug, Clone)]
pub struct Sprite {
    /// Texture to sample from; `None` draws nothing
    pub texture: Option<Texture2D>,
    /// Source rectangle inside the texture, in texture pixels
    pub source: Rect,
    /// Anchor as a fraction of the destination rectangle, each component in
    /// [0,1], subtracted from the top-left corner. (0,0) = top-left anchor,
    /// (0.5,0.5) = centered.
    pub pivot: Vec2,
}

impl Sprite {
    /// Create a sprite from a texture (possibly missing) and a source rect.
    /// Pivot starts at the top-left corner.
    pub fn new(texture: Option<Texture2D>, source: Rect) -> Self {
        Self {
            texture,
            source,
            pivot: Vec2::ZERO,
        }
    }

    /// Builder-style pivot override
    pub fn with_pivot(mut self, pivot: Vec2) -> Self {
        self.pivot = pivot;
        self
    }

    /// Source rectangle for a cell in a fixed-size sprite sheet.
    /// `col`/`row` count from the top-left cell.
    pub fn sheet_cell(col: u32, row: u32, cell_w: f32, cell_h: f32) -> Rect {
        Rect::new(col as f32 * cell_w, row as f32 * cell_h, cell_w, cell_h)
    }

    /// Draw the sprite into a screen-space destination rectangle.
    /// No-ops when the texture is missing.
    pub fn draw(&self, dest: Rect) {
        let Some(texture) = &self.texture else {
            return;
        };
        draw_texture_ex(
            texture,
            dest.x,
            dest.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(dest.w, dest.h)),
                source: Some(self.source),
                ..Default::default()
            },
        );
    }
}

impl Default for Sprite {
    fn default() -> Self {
        Self::new(None, Rect::new(0.0, 0.0, 0.0, 0.0))
    }
}
