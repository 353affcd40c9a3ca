//! Owned simulation facade
//!
//! The outside world posts an [`InputState`] per frame and reads back a
//! [`Snapshot`]; it never reaches into the world directly.

use super::camera::Camera;
use super::entity::Entity;
use super::level::LevelDocument;
use super::state::{GameEvent, Outcome, World};
use super::tick::tick;
use crate::input::InputState;
use crate::tuning::Tuning;

/// Read-only view of everything the renderer needs
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub player: &'a Entity,
    /// Store order, player excluded
    pub entities: &'a [Entity],
    pub camera: Camera,
    pub viewport: (f32, f32),
}

/// One loaded level plus its camera
#[derive(Debug, Clone)]
pub struct Simulation {
    level: LevelDocument,
    world: World,
    camera: Camera,
    tuning: Tuning,
    viewport: (f32, f32),
}

impl Simulation {
    pub fn new(level: LevelDocument, tuning: Tuning, viewport: (f32, f32)) -> Self {
        log::info!(
            "Loading level '{}' ({} platforms, {} enemies, {} coins)",
            level.name,
            level.platforms.len(),
            level.enemies.len(),
            level.coins.len()
        );
        let tuning = tuning.validated();
        let world = World::from_level(&level, &tuning);
        Self {
            level,
            world,
            camera: Camera::default(),
            tuning,
            viewport,
        }
    }

    /// Replace the level; the entity store and camera start over
    pub fn load(&mut self, level: LevelDocument) {
        *self = Self::new(level, self.tuning, self.viewport);
    }

    /// Rebuild the current level from its document
    pub fn reset(&mut self) {
        self.world = World::from_level(&self.level, &self.tuning);
        self.camera = Camera::default();
    }

    /// Advance physics by one frame
    pub fn step(&mut self, input: &InputState) -> Vec<GameEvent> {
        tick(&mut self.world, input, &self.tuning)
    }

    /// Move the camera toward the player
    pub fn update_camera(&mut self) {
        self.camera.follow(
            self.world.player.pos.x,
            self.viewport.0,
            self.world.width,
            self.tuning.camera_smoothing,
        );
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            player: &self.world.player,
            entities: &self.world.entities,
            camera: self.camera,
            viewport: self.viewport,
        }
    }

    pub fn level(&self) -> &LevelDocument {
        &self.level
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.world.outcome
    }
}
