//! Frame Pacing
//!
//! The main loop measures its own work time and burns the remainder of the
//! frame budget before presenting: a coarse sleep for the bulk, then a short
//! spin-wait for precision. The delta used by the next tick comes from
//! macroquad's `get_frame_time()` and carries no upper clamp, so a stalled
//! frame (debugger pause) produces a proportionally large step.

use macroquad::prelude::get_time;
use serde::{Deserialize, Serialize};

/// Target frame rate cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FpsLimit {
    Fps30,
    #[default]
    Fps60,
    /// As fast as the platform presents
    Unlocked,
}

impl FpsLimit {
    /// Target frame time in seconds (None = unlocked)
    pub fn frame_time(&self) -> Option<f64> {
        match self {
            FpsLimit::Fps30 => Some(1.0 / 30.0),
            FpsLimit::Fps60 => Some(1.0 / 60.0),
            FpsLimit::Unlocked => None,
        }
    }

    /// Display name
    pub fn label(&self) -> &'static str {
        match self {
            FpsLimit::Fps30 => "30",
            FpsLimit::Fps60 => "60",
            FpsLimit::Unlocked => "Unlocked",
        }
    }
}

/// Burn the rest of the frame budget. `frame_start` is the `get_time()`
/// reading taken at the top of the frame.
pub fn limit_frame_rate(frame_start: f64, limit: FpsLimit) {
    let Some(target_frame_time) = limit.frame_time() else {
        return;
    };

    let elapsed = get_time() - frame_start;
    if elapsed >= target_frame_time {
        return;
    }

    // Sleep in 1ms steps for the bulk, leave a margin for the spin-wait
    let spin_margin = 0.002;
    while get_time() - frame_start + spin_margin < target_frame_time {
        std::thread::sleep(std::time::Duration::from_millis(1));
    }
    while get_time() - frame_start < target_frame_time {
        std::hint::spin_loop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_time_targets() {
        assert_eq!(FpsLimit::Fps60.frame_time(), Some(1.0 / 60.0));
        assert_eq!(FpsLimit::Fps30.frame_time(), Some(1.0 / 30.0));
        assert_eq!(FpsLimit::Unlocked.frame_time(), None);
    }

    #[test]
    fn test_default_is_60() {
        assert_eq!(FpsLimit::default(), FpsLimit::Fps60);
    }
}
