//! Frame driver
//!
//! Owns the session, the simulation and the input sampler, and runs
//! Physics -> Camera -> Render exactly once per call to [`FrameDriver::frame`].
//! Event handlers on the host side only ever touch the input methods.

use crate::input::{Button, InputSampler};
use crate::renderer::{Canvas, draw_frame};
use crate::sim::{GameEvent, GamePhase, GameSession, LevelDocument, RetryOutcome, Simulation, TransitionError};
use crate::tuning::Tuning;

pub struct FrameDriver {
    session: GameSession,
    sim: Simulation,
    input: InputSampler,
    frames: u64,
}

impl FrameDriver {
    pub fn new(level: LevelDocument, tuning: Tuning, viewport: (f32, f32)) -> Self {
        Self {
            session: GameSession::new(),
            sim: Simulation::new(level, tuning, viewport),
            input: InputSampler::new(),
            frames: 0,
        }
    }

    /// Run one animation tick. Physics only advances while playing; the
    /// camera and the draw pass run every frame.
    pub fn frame<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> Vec<GameEvent> {
        let events = if self.session.is_playing() {
            let input = self.input.sample();
            let events = self.sim.step(&input);
            self.session.apply(&events);
            events
        } else {
            Vec::new()
        };

        self.sim.update_camera();
        draw_frame(canvas, &self.sim.snapshot());
        self.frames += 1;
        events
    }

    /// Swap in a new level; the world and camera start over
    pub fn load_level(&mut self, level: LevelDocument) {
        self.input.release_all();
        self.sim.load(level);
    }

    /// Menu -> Playing on a fresh copy of the current level
    pub fn start(&mut self) -> Result<(), TransitionError> {
        self.session.start()?;
        self.sim.reset();
        Ok(())
    }

    /// GameOver -> Playing (same level, positions and flags reset) or Menu
    pub fn retry(&mut self) -> Result<RetryOutcome, TransitionError> {
        let outcome = self.session.retry()?;
        self.sim.reset();
        Ok(outcome)
    }

    /// Victory -> Playing, on `level` if given or the current level again
    pub fn next_level(&mut self, level: Option<LevelDocument>) -> Result<(), TransitionError> {
        self.session.next_level()?;
        match level {
            Some(level) => self.load_level(level),
            None => self.sim.reset(),
        }
        Ok(())
    }

    pub fn to_menu(&mut self) {
        self.session.to_menu();
        self.sim.reset();
    }

    /// The single "continue" action bound to Enter and the overlay button.
    /// Does nothing while playing.
    pub fn confirm(&mut self) {
        let result = match self.session.phase() {
            GamePhase::Menu => self.start(),
            GamePhase::GameOver => self.retry().map(|_| ()),
            GamePhase::Victory => self.next_level(None),
            GamePhase::Playing => Ok(()),
        };
        if let Err(e) = result {
            log::warn!("Ignoring transition: {}", e);
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if (width, height) != self.sim.snapshot().viewport {
            log::debug!("Viewport resized to {}x{}", width, height);
            self.sim.set_viewport(width, height);
        }
    }

    pub fn key_down(&mut self, code: &str) -> bool {
        self.input.key_down(code)
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        self.input.key_up(code)
    }

    pub fn touch(&mut self, button: Button, pressed: bool) {
        self.input.touch(button, pressed);
    }

    pub fn release_all(&mut self) {
        self.input.release_all();
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    /// Animation ticks run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::VertexBatch;
    use crate::sim::{DeathCause, Outcome};

    const PIT: &str = r#"{
        "id": "pit", "name": "Pit", "width": 2000, "height": 600,
        "playerStart": {"x": 100, "y": 300},
        "platforms": [],
        "enemies": [],
        "coins": [{"x": 105, "y": 400}],
        "goal": {"x": 1800, "y": 440}
    }"#;

    fn driver(json: &str) -> FrameDriver {
        FrameDriver::new(
            LevelDocument::from_json(json).unwrap(),
            Tuning::default(),
            (800.0, 600.0),
        )
    }

    #[test]
    fn test_menu_does_not_simulate() {
        let mut d = driver(PIT);
        let mut batch = VertexBatch::new(8);
        for _ in 0..30 {
            assert!(d.frame(&mut batch).is_empty());
        }
        assert_eq!(d.simulation().world().time_ticks, 0);
        assert_eq!(d.frames(), 30);
        // Still drawn every frame
        assert!(!batch.vertices().is_empty());
    }

    #[test]
    fn test_fall_to_game_over_and_retry() {
        let mut d = driver(PIT);
        let mut batch = VertexBatch::new(8);
        d.confirm();
        assert!(d.session().is_playing());

        let mut all = Vec::new();
        for _ in 0..200 {
            all.extend(d.frame(&mut batch));
            if d.session().phase() != GamePhase::Playing {
                break;
            }
        }
        // Falls through the coin on the way down
        assert_eq!(d.session().score, 100);
        assert!(all.contains(&GameEvent::PlayerDied {
            cause: DeathCause::FellOutOfWorld
        }));
        assert_eq!(d.session().phase(), GamePhase::GameOver);
        assert_eq!(d.simulation().outcome(), Some(Outcome::Defeat));

        // Frozen after the terminal transition
        let ticks = d.simulation().world().time_ticks;
        d.frame(&mut batch);
        assert_eq!(d.simulation().world().time_ticks, ticks);

        d.confirm();
        assert!(d.session().is_playing());
        let world = d.simulation().world();
        assert_eq!(world.time_ticks, 0);
        assert!(world.player.alive);
        assert_eq!(world.player.pos.y, 300.0);
        assert_eq!(world.count(crate::sim::EntityKind::Coin), 1);
    }

    #[test]
    fn test_input_reaches_physics() {
        let mut d = driver(PIT);
        let mut batch = VertexBatch::new(8);
        d.start().unwrap();
        assert!(d.key_down("KeyD"));
        assert!(!d.key_down("KeyQ"));
        d.frame(&mut batch);
        assert_eq!(d.simulation().world().player.vel.x, 1.5);

        d.release_all();
        d.touch(Button::Left, true);
        d.frame(&mut batch);
        assert_eq!(d.simulation().world().player.vel.x, 0.0);
    }

    #[test]
    fn test_transition_errors_are_reported() {
        let mut d = driver(PIT);
        assert!(d.retry().is_err());
        assert!(d.next_level(None).is_err());
        d.start().unwrap();
        assert!(d.start().is_err());
        // confirm while playing is a no-op
        d.confirm();
        assert!(d.session().is_playing());
    }

    #[test]
    fn test_load_level_replaces_world() {
        let mut d = driver(PIT);
        d.key_down("ArrowRight");
        d.load_level(LevelDocument::default_level());
        assert_eq!(d.simulation().level().id, LevelDocument::default_level().id);
        assert!(!d.simulation().world().entities.is_empty());
        // Held keys do not leak into the new level
        d.start().unwrap();
        let mut batch = VertexBatch::new(8);
        d.frame(&mut batch);
        assert_eq!(d.simulation().world().player.vel.x, 0.0);
    }

    #[test]
    fn test_resize_updates_viewport() {
        let mut d = driver(PIT);
        d.resize(1024.0, 768.0);
        assert_eq!(d.simulation().snapshot().viewport, (1024.0, 768.0));
    }
}
