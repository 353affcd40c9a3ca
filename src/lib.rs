//! Star Jump - A side-scrolling platformer starring a star
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level loading, physics, collisions, camera, session)
//! - `renderer`: 2D draw pass and WebGPU triangle pipeline
//! - `input`: Keyboard/touch button sampling
//! - `driver`: Per-frame Physics -> Camera -> Render sequencing
//! - `tuning`: Data-driven physics constants

pub mod driver;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use driver::FrameDriver;
pub use input::{Button, InputSampler, InputState};
pub use settings::{QualityPreset, Settings};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// Velocities are in pixels per frame; the simulation advances exactly one
/// step per rendered frame.
pub mod consts {
    /// Downward acceleration added every frame
    pub const GRAVITY: f32 = 0.6;
    /// Maximum downward speed
    pub const TERMINAL_VELOCITY: f32 = 12.0;
    /// Vertical velocity applied on jump (negative is up)
    pub const JUMP_FORCE: f32 = -14.0;
    /// Maximum horizontal speed
    pub const MOVE_SPEED: f32 = 6.0;
    /// Horizontal velocity change per frame while a direction is held
    pub const ACCELERATION: f32 = 1.5;
    /// Horizontal velocity multiplier per frame without input
    pub const FRICTION: f32 = 0.8;
    /// Enemy patrol speed
    pub const ENEMY_SPEED: f32 = 2.0;

    /// Player hitbox (square)
    pub const PLAYER_SIZE: f32 = 30.0;
    /// Enemy hitbox (square)
    pub const ENEMY_SIZE: f32 = 32.0;
    /// Coin hitbox (square)
    pub const COIN_SIZE: f32 = 20.0;
    /// Goal pole hitbox
    pub const GOAL_WIDTH: f32 = 20.0;
    pub const GOAL_HEIGHT: f32 = 140.0;
    /// Distance the pole top sits above the document's goal point
    pub const GOAL_POLE_OFFSET: f32 = 100.0;

    /// How far below the level bottom the player may fall before dying
    pub const FALL_MARGIN: f32 = 200.0;
    /// Camera smoothing factor per frame
    pub const CAMERA_SMOOTHING: f32 = 0.1;

    /// Points per coin
    pub const COIN_POINTS: u64 = 100;
    /// Lives at the start of a run
    pub const STARTING_LIVES: u8 = 3;
}

/// Axis-aligned overlap test on open intervals (touching edges don't overlap).
///
/// Boxes with a non-positive extent never overlap anything.
#[inline]
pub fn aabb_overlap(a_pos: glam::Vec2, a_size: glam::Vec2, b_pos: glam::Vec2, b_size: glam::Vec2) -> bool {
    if a_size.x <= 0.0 || a_size.y <= 0.0 || b_size.x <= 0.0 || b_size.y <= 0.0 {
        return false;
    }
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let size = Vec2::splat(10.0);
        assert!(!aabb_overlap(Vec2::ZERO, size, Vec2::new(10.0, 0.0), size));
        assert!(!aabb_overlap(Vec2::ZERO, size, Vec2::new(0.0, 10.0), size));
        assert!(aabb_overlap(Vec2::ZERO, size, Vec2::new(9.9, 9.9), size));
    }

    #[test]
    fn test_degenerate_boxes_never_overlap() {
        let big = Vec2::splat(100.0);
        assert!(!aabb_overlap(Vec2::ZERO, big, Vec2::splat(50.0), Vec2::new(0.0, 10.0)));
        assert!(!aabb_overlap(Vec2::splat(50.0), Vec2::new(10.0, -5.0), Vec2::ZERO, big));
    }

    proptest! {
        #[test]
        fn prop_overlap_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in -10.0f32..200.0, ah in -10.0f32..200.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in -10.0f32..200.0, bh in -10.0f32..200.0,
        ) {
            let (a, asz) = (Vec2::new(ax, ay), Vec2::new(aw, ah));
            let (b, bsz) = (Vec2::new(bx, by), Vec2::new(bw, bh));
            prop_assert_eq!(aabb_overlap(a, asz, b, bsz), aabb_overlap(b, bsz, a, asz));
        }
    }
}
