//! Per-frame draw pass
//!
//! Reads a [`Snapshot`] and issues canvas calls; never touches game state.

use glam::Vec2;

use super::canvas::Canvas;
use super::shapes::star_points;
use super::vertex::colors;
use crate::sim::{Entity, EntityKind, Snapshot};

const BEVEL: f32 = 4.0;
const COIN_RIM_WIDTH: f32 = 2.0;
const POLE_WIDTH: f32 = 4.0;
const POLE_CAP_RADIUS: f32 = 6.0;
const PLAYER_EYE_RADIUS: f32 = 2.0;

/// Draw one frame: background, world in store order, then the player on top
pub fn draw_frame<C: Canvas + ?Sized>(canvas: &mut C, snapshot: &Snapshot<'_>) {
    canvas.clear(colors::BACKGROUND);
    canvas.set_offset(snapshot.camera.draw_offset());

    for entity in snapshot.entities.iter().filter(|e| e.alive) {
        match entity.kind {
            EntityKind::Platform | EntityKind::Decoration => draw_block(canvas, entity),
            EntityKind::Enemy => draw_enemy(canvas, entity),
            EntityKind::Coin => draw_coin(canvas, entity),
            EntityKind::Goal => draw_goal(canvas, entity),
            // The player is never stored alongside the world
            EntityKind::Player => {}
        }
    }

    if snapshot.player.alive {
        draw_player(canvas, snapshot.player);
    }
}

fn draw_block<C: Canvas + ?Sized>(canvas: &mut C, e: &Entity) {
    canvas.fill_rect(e.pos, e.size, e.color);
    canvas.fill_rect(e.pos, Vec2::new(e.size.x, BEVEL), colors::BEVEL_LIGHT);
    canvas.fill_rect(
        Vec2::new(e.pos.x, e.pos.y + e.size.y - BEVEL),
        Vec2::new(e.size.x, BEVEL),
        colors::BEVEL_SHADOW,
    );
}

fn draw_enemy<C: Canvas + ?Sized>(canvas: &mut C, e: &Entity) {
    canvas.fill_rect(e.pos, e.size, e.color);
    for dx in [4.0, 20.0] {
        canvas.fill_rect(e.pos + Vec2::new(dx, 8.0), Vec2::splat(8.0), colors::EYE_WHITE);
        canvas.fill_rect(e.pos + Vec2::new(dx + 2.0, 10.0), Vec2::splat(4.0), colors::EYE_PUPIL);
    }
}

fn draw_coin<C: Canvas + ?Sized>(canvas: &mut C, e: &Entity) {
    let radius = e.size.x / 2.0;
    canvas.fill_circle(e.center(), radius, e.color);
    canvas.stroke_circle(e.center(), radius, COIN_RIM_WIDTH, colors::COIN_RIM);
}

fn draw_goal<C: Canvas + ?Sized>(canvas: &mut C, e: &Entity) {
    let Vec2 { x, y } = e.pos;
    canvas.fill_rect(Vec2::new(x + 8.0, y), Vec2::new(POLE_WIDTH, e.size.y), e.color);
    canvas.fill_polygon(
        &[
            Vec2::new(x + 12.0, y + 10.0),
            Vec2::new(x + 40.0, y + 25.0),
            Vec2::new(x + 12.0, y + 40.0),
        ],
        colors::FLAG,
    );
    canvas.fill_circle(Vec2::new(x + 10.0, y), POLE_CAP_RADIUS, colors::POLE_CAP);
}

fn draw_player<C: Canvas + ?Sized>(canvas: &mut C, p: &Entity) {
    let center = p.center();
    let star = star_points(center, p.size.x / 2.0, p.size.x / 4.0, 5);
    canvas.fill_polygon(&star, p.color);

    // Eyes look the way the player is moving; standing still faces right
    let look = if p.vel.x >= 0.0 { 3.0 } else { -3.0 };
    for side in [-5.0, 5.0] {
        canvas.fill_circle(
            Vec2::new(center.x + side + look, center.y - 2.0),
            PLAYER_EYE_RADIUS,
            colors::EYE_PUPIL,
        );
    }
}
