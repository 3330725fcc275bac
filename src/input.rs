//! Input Snapshot
//!
//! One poll of macroquad's input state per tick, flattened into plain
//! booleans the way the update code wants to consume them. Update logic
//! takes the snapshot by value and never touches the input backend, which
//! keeps it testable without a window.

use macroquad::prelude::*;

/// Input state sampled once at the top of a frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    /// Directional holds (WASD)
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire was pressed this frame (space)
    pub fire: bool,
    /// Left mouse button was pressed this frame
    pub clicked: bool,
    /// Mouse position in screen pixels
    pub mouse: Vec2,
    /// Vertical scroll since last frame
    pub scroll: f32,
    /// Quit requested (escape)
    pub quit: bool,
}

impl InputState {
    /// Sample the current input state. Call once per tick.
    pub fn poll() -> Self {
        let (mouse_x, mouse_y) = mouse_position();
        Self {
            up: is_key_down(KeyCode::W),
            down: is_key_down(KeyCode::S),
            left: is_key_down(KeyCode::A),
            right: is_key_down(KeyCode::D),
            fire: is_key_pressed(KeyCode::Space),
            clicked: is_mouse_button_pressed(MouseButton::Left),
            mouse: vec2(mouse_x, mouse_y),
            scroll: mouse_wheel().1,
            quit: is_key_pressed(KeyCode::Escape),
        }
    }

    /// Held movement direction in world axes (Y up), normalized so
    /// diagonals aren't faster than straight movement.
    pub fn direction(&self) -> Vec2 {
        let mut result = Vec2::ZERO;
        if self.up {
            result.y += 1.0;
        }
        if self.down {
            result.y -= 1.0;
        }
        if self.left {
            result.x -= 1.0;
        }
        if self.right {
            result.x += 1.0;
        }
        if result.length() > 1.0 {
            result = result.normalize();
        }
        result
    }
}
