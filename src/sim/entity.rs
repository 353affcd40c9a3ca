//! Simulation entities

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::aabb_overlap;

/// Linear RGBA color, presentation only
pub type Rgba = [f32; 4];

/// Stable identifier, unique within one level instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Platform,
    Enemy,
    Coin,
    Goal,
    /// Render-only scenery; never collides
    Decoration,
}

/// One simulated object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// False once defeated or collected; removed at end of frame
    pub alive: bool,
    pub color: Rgba,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind, pos: Vec2, size: Vec2, color: Rgba) -> Self {
        Self {
            id,
            kind,
            pos,
            size,
            vel: Vec2::ZERO,
            alive: true,
            color,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    /// Strict AABB overlap with another entity
    pub fn overlaps(&self, other: &Entity) -> bool {
        aabb_overlap(self.pos, self.size, other.pos, other.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Whether the entity takes part in collisions
    pub fn is_interactive(&self) -> bool {
        self.alive && self.kind != EntityKind::Decoration
    }
}

/// Parse a CSS `#rrggbb` / `#rgb` color
pub fn hex_color(s: &str) -> Option<Rgba> {
    let hex = s.trim().strip_prefix('#')?;
    let channel = |v: u32| v as f32 / 255.0;
    match hex.len() {
        6 => {
            let v = u32::from_str_radix(hex, 16).ok()?;
            Some([channel((v >> 16) & 0xff), channel((v >> 8) & 0xff), channel(v & 0xff), 1.0])
        }
        3 => {
            let v = u32::from_str_radix(hex, 16).ok()?;
            let expand = |n: u32| channel(n * 17);
            Some([expand((v >> 8) & 0xf), expand((v >> 4) & 0xf), expand(v & 0xf), 1.0])
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(x: f32, y: f32, w: f32, h: f32) -> Entity {
        Entity::new(
            EntityId(0),
            EntityKind::Platform,
            Vec2::new(x, y),
            Vec2::new(w, h),
            [1.0; 4],
        )
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = block(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&block(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&block(0.0, 10.0, 10.0, 10.0)));
        assert!(a.overlaps(&block(9.9, 9.9, 10.0, 10.0)));
    }

    #[test]
    fn test_degenerate_never_overlaps() {
        let a = block(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&block(5.0, 5.0, 0.0, 10.0)));
        assert!(!a.overlaps(&block(5.0, 5.0, 3.0, -2.0)));
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#ff0000"), Some([1.0, 0.0, 0.0, 1.0]));
        assert_eq!(hex_color("#fff"), Some([1.0, 1.0, 1.0, 1.0]));
        assert_eq!(hex_color("red"), None);
        assert_eq!(hex_color("#12345"), None);
        assert_eq!(hex_color("#gg0000"), None);
    }
}
