//! Data-driven physics constants
//!
//! Defaults mirror [`crate::consts`]. A tuning file only needs the fields it
//! overrides; everything else falls back to the default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TuningError {
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },
    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

/// Physics and camera constants read by the simulation every step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tuning {
    pub gravity: f32,
    pub terminal_velocity: f32,
    pub jump_force: f32,
    pub move_speed: f32,
    pub acceleration: f32,
    pub friction: f32,
    pub enemy_speed: f32,
    /// Multiplier on `jump_force` applied after a stomp
    pub stomp_bounce: f32,
    pub fall_margin: f32,
    pub camera_smoothing: f32,
    pub coin_points: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            terminal_velocity: TERMINAL_VELOCITY,
            jump_force: JUMP_FORCE,
            move_speed: MOVE_SPEED,
            acceleration: ACCELERATION,
            friction: FRICTION,
            enemy_speed: ENEMY_SPEED,
            stomp_bounce: 0.5,
            fall_margin: FALL_MARGIN,
            camera_smoothing: CAMERA_SMOOTHING,
            coin_points: COIN_POINTS,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON, keeping defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match serde_json::from_str::<Tuning>(json) {
            Ok(tuning) => tuning.validated(),
            Err(e) => {
                log::warn!("Ignoring invalid tuning overrides: {}", e);
                Self::default()
            }
        }
    }

    /// Check every value the step function relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let floats = [
            ("gravity", self.gravity),
            ("terminalVelocity", self.terminal_velocity),
            ("jumpForce", self.jump_force),
            ("moveSpeed", self.move_speed),
            ("acceleration", self.acceleration),
            ("friction", self.friction),
            ("enemySpeed", self.enemy_speed),
            ("stompBounce", self.stomp_bounce),
            ("fallMargin", self.fall_margin),
            ("cameraSmoothing", self.camera_smoothing),
        ];
        for (field, value) in floats {
            if !value.is_finite() {
                return Err(TuningError::NonFinite { field, value });
            }
        }

        let ranges = [
            ("moveSpeed", self.move_speed, 0.0, f32::MAX),
            ("terminalVelocity", self.terminal_velocity, 0.0, f32::MAX),
            ("stompBounce", self.stomp_bounce, 0.0, f32::MAX),
            ("friction", self.friction, 0.0, 1.0),
            ("cameraSmoothing", self.camera_smoothing, 0.0, 1.0),
        ];
        for (field, value, min, max) in ranges {
            if !(min..=max).contains(&value) {
                return Err(TuningError::OutOfRange {
                    field,
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }

    /// `self` if valid, otherwise the defaults
    pub fn validated(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                log::warn!("Rejected tuning ({}), using defaults", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override() {
        let tuning = Tuning::from_json_or_default(r#"{ "gravity": 0.5, "moveSpeed": 8 }"#);
        assert_eq!(tuning.gravity, 0.5);
        assert_eq!(tuning.move_speed, 8.0);
        assert_eq!(tuning.friction, FRICTION);
        assert_eq!(tuning.coin_points, COIN_POINTS);
    }

    #[test]
    fn test_invalid_json_falls_back() {
        assert_eq!(Tuning::from_json_or_default("{ not json"), Tuning::default());
    }

    #[test]
    fn test_out_of_range_values_fall_back() {
        for json in [
            r#"{ "moveSpeed": -1 }"#,
            r#"{ "terminalVelocity": -12 }"#,
            r#"{ "friction": 1.5 }"#,
            r#"{ "stompBounce": -0.5 }"#,
            r#"{ "cameraSmoothing": 2 }"#,
        ] {
            assert_eq!(Tuning::from_json_or_default(json), Tuning::default(), "{json}");
        }
    }

    #[test]
    fn test_validate_reports_field() {
        let tuning = Tuning {
            move_speed: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::OutOfRange { field: "moveSpeed", .. })
        ));

        let tuning = Tuning {
            gravity: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NonFinite { field: "gravity", .. })
        ));
        assert_eq!(tuning.validated(), Tuning::default());
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_rejected_tuning_still_steps() {
        use crate::input::InputState;
        use crate::sim::{LevelDocument, Simulation};

        let tuning = Tuning::from_json_or_default(r#"{ "moveSpeed": -1 }"#);
        let mut sim = Simulation::new(LevelDocument::default_level(), tuning, (800.0, 600.0));
        let right = InputState {
            right: true,
            ..Default::default()
        };
        sim.step(&right);
        assert_eq!(sim.world().player.vel.x, ACCELERATION);
    }
}
