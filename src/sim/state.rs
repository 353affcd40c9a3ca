//! Entity store and simulation events
//!
//! Everything that changes during a level lives in [`World`]. A world is
//! only ever built from a [`LevelDocument`]; reloading rebuilds it in full.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind, Rgba, hex_color};
use super::level::LevelDocument;
use crate::consts::*;
use crate::tuning::Tuning;

/// Default entity colors
pub mod palette {
    use super::Rgba;

    /// Star yellow (#fbbf24)
    pub const PLAYER: Rgba = [0.984, 0.749, 0.141, 1.0];
    /// Gray-600 (#4b5563)
    pub const PLATFORM: Rgba = [0.294, 0.333, 0.388, 1.0];
    /// Brown (#854d0e)
    pub const ENEMY: Rgba = [0.522, 0.302, 0.055, 1.0];
    /// Yellow-500 (#eab308)
    pub const COIN: Rgba = [0.918, 0.702, 0.031, 1.0];
    /// Green (#22c55e)
    pub const GOAL: Rgba = [0.133, 0.773, 0.369, 1.0];
}

/// Why the player died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    FellOutOfWorld,
    HitByEnemy(EntityId),
}

/// Side effects of one simulation step, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    CoinCollected { coin: EntityId, points: u64 },
    EnemyStomped { enemy: EntityId },
    /// Terminal: requests the GameOver transition
    PlayerDied { cause: DeathCause },
    /// Terminal: requests the Victory transition
    GoalReached,
}

impl GameEvent {
    /// Whether this event ends the level
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::PlayerDied { .. } | GameEvent::GoalReached)
    }
}

/// Terminal outcome of a level instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Defeat,
    Victory,
}

/// Mutable state of one level instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Level bounds
    pub width: f32,
    pub height: f32,
    /// The player, held apart from the other entities
    pub player: Entity,
    /// Platforms, enemies, coins and the goal, in document order
    pub entities: Vec<Entity>,
    /// Set by the first terminal event; further steps are no-ops
    pub outcome: Option<Outcome>,
    /// Steps simulated since load
    pub time_ticks: u64,
    next_id: u32,
}

impl World {
    /// Instantiate a level. Ids are handed out in document order, so loading
    /// the same document twice yields identical worlds.
    pub fn from_level(level: &LevelDocument, tuning: &Tuning) -> Self {
        let player = Entity::new(
            EntityId(u32::MAX),
            EntityKind::Player,
            level.player_start.into(),
            Vec2::splat(PLAYER_SIZE),
            palette::PLAYER,
        );

        let mut world = Self {
            width: level.width,
            height: level.height,
            player,
            entities: Vec::with_capacity(
                level.platforms.len() + level.enemies.len() + level.coins.len() + 1,
            ),
            outcome: None,
            time_ticks: 0,
            next_id: 0,
        };

        for p in &level.platforms {
            let color = p
                .color
                .as_deref()
                .and_then(hex_color)
                .unwrap_or(palette::PLATFORM);
            world.spawn(
                EntityKind::Platform,
                Vec2::new(p.x, p.y),
                Vec2::new(p.w, p.h),
                color,
                Vec2::ZERO,
            );
        }

        for e in &level.enemies {
            world.spawn(
                EntityKind::Enemy,
                (*e).into(),
                Vec2::splat(ENEMY_SIZE),
                palette::ENEMY,
                Vec2::new(-tuning.enemy_speed, 0.0),
            );
        }

        for c in &level.coins {
            world.spawn(
                EntityKind::Coin,
                (*c).into(),
                Vec2::splat(COIN_SIZE),
                palette::COIN,
                Vec2::ZERO,
            );
        }

        // The pole's top sits above the goal point; its hitbox spans the whole pole
        world.spawn(
            EntityKind::Goal,
            Vec2::new(level.goal.x, level.goal.y - GOAL_POLE_OFFSET),
            Vec2::new(GOAL_WIDTH, GOAL_HEIGHT),
            palette::GOAL,
            Vec2::ZERO,
        );

        world
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    fn spawn(&mut self, kind: EntityKind, pos: Vec2, size: Vec2, color: Rgba, vel: Vec2) {
        let id = self.next_entity_id();
        self.entities
            .push(Entity::new(id, kind, pos, size, color).with_velocity(vel));
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }

    /// Drop defeated enemies and collected coins
    pub fn remove_dead(&mut self) {
        self.entities.retain(|e| e.alive);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instantiation_counts() {
        let level = LevelDocument::default_level();
        let world = World::from_level(&level, &Tuning::default());

        assert_eq!(world.count(EntityKind::Platform), level.platforms.len());
        assert_eq!(world.count(EntityKind::Enemy), level.enemies.len());
        assert_eq!(world.count(EntityKind::Coin), level.coins.len());
        assert_eq!(world.count(EntityKind::Goal), 1);
        assert_eq!(world.count(EntityKind::Player), 0);
        assert_eq!(world.player.pos, Vec2::new(100.0, 300.0));
        assert_eq!(world.player.vel, Vec2::ZERO);
        assert!(world.player.alive);
    }

    #[test]
    fn test_enemies_patrol_left() {
        let world = World::from_level(&LevelDocument::default_level(), &Tuning::default());
        for enemy in world.entities.iter().filter(|e| e.kind == EntityKind::Enemy) {
            assert_eq!(enemy.vel, Vec2::new(-ENEMY_SPEED, 0.0));
            assert_eq!(enemy.size, Vec2::splat(ENEMY_SIZE));
        }
    }

    #[test]
    fn test_goal_pole_geometry() {
        let world = World::from_level(&LevelDocument::default_level(), &Tuning::default());
        let goal = world
            .entities
            .iter()
            .find(|e| e.kind == EntityKind::Goal)
            .unwrap();
        assert_eq!(goal.pos, Vec2::new(2800.0, 300.0));
        assert_eq!(goal.size, Vec2::new(GOAL_WIDTH, GOAL_HEIGHT));
    }

    #[test]
    fn test_platform_colors() {
        let mut level = LevelDocument::default_level();
        level.platforms[0].color = Some("#ff0000".to_string());
        level.platforms[1].color = Some("not a color".to_string());
        let world = World::from_level(&level, &Tuning::default());
        assert_eq!(world.entities[0].color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(world.entities[1].color, palette::PLATFORM);
    }

    #[test]
    fn test_reload_is_identical() {
        let level = LevelDocument::default_level();
        let a = World::from_level(&level, &Tuning::default());
        let b = World::from_level(&level, &Tuning::default());
        assert_eq!(a.entities, b.entities);
        assert_eq!(a.player, b.player);
    }

    #[test]
    fn test_remove_dead() {
        let mut world = World::from_level(&LevelDocument::default_level(), &Tuning::default());
        let before = world.entities.len();
        let coin = world
            .entities
            .iter()
            .position(|e| e.kind == EntityKind::Coin)
            .unwrap();
        let coin_id = world.entities[coin].id;
        world.entities[coin].alive = false;
        world.remove_dead();
        assert_eq!(world.entities.len(), before - 1);
        assert!(world.entity(coin_id).is_none());
    }
}
