//! Axis-separated collision response against static platforms
//!
//! Horizontal and vertical displacement are applied and resolved in two
//! separate passes, so a corner hit is always settled along the axis that
//! moved first.

use super::entity::{Entity, EntityKind};

/// Result of the vertical pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerticalContact {
    /// Landed on top of a platform this frame
    pub grounded: bool,
}

/// Push `body` out of every overlapping platform along x.
///
/// Each overlapping platform is applied in order; level geometry is expected
/// not to overlap, so the last write wins.
pub fn resolve_horizontal<'a>(body: &mut Entity, platforms: impl IntoIterator<Item = &'a Entity>) {
    for plat in platforms {
        if plat.kind != EntityKind::Platform || !body.overlaps(plat) {
            continue;
        }
        if body.vel.x > 0.0 {
            body.pos.x = plat.pos.x - body.size.x;
        } else if body.vel.x < 0.0 {
            body.pos.x = plat.pos.x + plat.size.x;
        }
        body.vel.x = 0.0;
    }
}

/// Push `body` out of every overlapping platform along y.
pub fn resolve_vertical<'a>(
    body: &mut Entity,
    platforms: impl IntoIterator<Item = &'a Entity>,
) -> VerticalContact {
    let mut contact = VerticalContact::default();
    for plat in platforms {
        if plat.kind != EntityKind::Platform || !body.overlaps(plat) {
            continue;
        }
        if body.vel.y > 0.0 {
            body.pos.y = plat.pos.y - body.size.y;
            contact.grounded = true;
        } else if body.vel.y < 0.0 {
            body.pos.y = plat.pos.y + plat.size.y;
        }
        body.vel.y = 0.0;
    }
    contact
}

/// Whether a body overlapping `enemy` came down on top of it.
///
/// The previous bottom edge is reconstructed as `bottom - vel.y`, which
/// matches the real previous position unless `vel.y` was clamped this frame.
pub fn is_stomp(body: &Entity, enemy: &Entity) -> bool {
    let previous_bottom = body.bottom() - body.vel.y;
    body.vel.y > 0.0 && previous_bottom < enemy.pos.y + enemy.size.y / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityId;
    use glam::Vec2;

    fn platform(x: f32, y: f32, w: f32, h: f32) -> Entity {
        Entity::new(
            EntityId(1),
            EntityKind::Platform,
            Vec2::new(x, y),
            Vec2::new(w, h),
            [1.0; 4],
        )
    }

    fn body(x: f32, y: f32, vel: Vec2) -> Entity {
        Entity::new(
            EntityId(0),
            EntityKind::Player,
            Vec2::new(x, y),
            Vec2::splat(30.0),
            [1.0; 4],
        )
        .with_velocity(vel)
    }

    #[test]
    fn test_horizontal_snap_right() {
        let wall = platform(100.0, 0.0, 50.0, 100.0);
        let mut b = body(75.0, 10.0, Vec2::new(5.0, 0.0));
        resolve_horizontal(&mut b, [&wall]);
        assert_eq!(b.pos.x, 70.0);
        assert_eq!(b.vel.x, 0.0);
    }

    #[test]
    fn test_horizontal_snap_left() {
        let wall = platform(100.0, 0.0, 50.0, 100.0);
        let mut b = body(145.0, 10.0, Vec2::new(-5.0, 0.0));
        resolve_horizontal(&mut b, [&wall]);
        assert_eq!(b.pos.x, 150.0);
        assert_eq!(b.vel.x, 0.0);
    }

    #[test]
    fn test_vertical_landing_and_ceiling() {
        let floor = platform(0.0, 100.0, 200.0, 20.0);

        let mut falling = body(10.0, 75.0, Vec2::new(0.0, 6.0));
        let contact = resolve_vertical(&mut falling, [&floor]);
        assert!(contact.grounded);
        assert_eq!(falling.pos.y, 70.0);
        assert_eq!(falling.vel.y, 0.0);

        let mut rising = body(10.0, 115.0, Vec2::new(0.0, -6.0));
        let contact = resolve_vertical(&mut rising, [&floor]);
        assert!(!contact.grounded);
        assert_eq!(rising.pos.y, 120.0);
        assert_eq!(rising.vel.y, 0.0);
    }

    #[test]
    fn test_non_platforms_ignored() {
        let mut coin = platform(0.0, 100.0, 200.0, 20.0);
        coin.kind = EntityKind::Coin;
        let mut falling = body(10.0, 75.0, Vec2::new(0.0, 6.0));
        let contact = resolve_vertical(&mut falling, [&coin]);
        assert!(!contact.grounded);
        assert_eq!(falling.pos.y, 75.0);
    }

    #[test]
    fn test_stomp_classification() {
        let enemy = Entity::new(
            EntityId(2),
            EntityKind::Enemy,
            Vec2::new(0.0, 100.0),
            Vec2::splat(32.0),
            [1.0; 4],
        );
        // Came from above (previous bottom 95 < midpoint 116)
        assert!(is_stomp(&body(0.0, 70.0, Vec2::new(0.0, 5.0)), &enemy));
        // Same height, not falling
        assert!(!is_stomp(&body(0.0, 102.0, Vec2::ZERO), &enemy));
        // Falling but already below the midpoint last frame
        assert!(!is_stomp(&body(0.0, 100.0, Vec2::new(0.0, 2.0)), &enemy));
    }
}
