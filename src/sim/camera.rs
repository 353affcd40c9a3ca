//! Horizontal follow camera
//!
//! The camera only scrolls sideways. Each frame it moves a fixed fraction
//! of the way toward centering the player, then is clamped to the level.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// World-space left edge of the viewport
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
}

impl Camera {
    /// Vertical scroll is fixed
    pub const Y: f32 = 0.0;

    /// Advance one frame toward centering `player_x`.
    ///
    /// When the level is narrower than the viewport the camera stays at 0.
    pub fn follow(&mut self, player_x: f32, viewport_width: f32, level_width: f32, smoothing: f32) {
        let target = player_x - viewport_width / 2.0;
        self.x += (target - self.x) * smoothing;
        self.x = self.x.min(level_width - viewport_width).max(0.0);
    }

    /// Integer-snapped translation applied to world coordinates when drawing
    pub fn draw_offset(&self) -> Vec2 {
        Vec2::new(-self.x.floor(), -Self::Y)
    }
}
