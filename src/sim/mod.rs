//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per rendered frame
//! - Stable iteration order (store order, which is document order)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod entity;
pub mod level;
pub mod session;
pub mod simulation;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use collision::{VerticalContact, is_stomp, resolve_horizontal, resolve_vertical};
pub use entity::{Entity, EntityId, EntityKind, Rgba, hex_color};
pub use level::{LevelDocument, LevelError, PlatformSpec, Point};
pub use session::{GamePhase, GameSession, RetryOutcome, TransitionError};
pub use simulation::{Simulation, Snapshot};
pub use state::{DeathCause, GameEvent, Outcome, World, palette};
pub use tick::tick;
