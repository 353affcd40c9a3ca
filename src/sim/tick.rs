//! Per-frame simulation step
//!
//! Advances the world by exactly one rendered frame. The order of the passes
//! below decides collision outcomes, so it must not be rearranged.

use super::collision::{is_stomp, resolve_horizontal, resolve_vertical};
use super::entity::EntityKind;
use super::state::{DeathCause, GameEvent, Outcome, World};
use crate::input::InputState;
use crate::tuning::Tuning;

/// Advance the world by one frame, returning what happened.
///
/// A world whose player is dead or that already reached an outcome is left
/// untouched.
pub fn tick(world: &mut World, input: &InputState, tuning: &Tuning) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !world.player.alive || world.outcome.is_some() {
        return events;
    }
    world.time_ticks += 1;

    integrate_player(world, input, tuning, &mut events);
    resolve_interactions(world, tuning, &mut events);
    world.remove_dead();

    events
}

fn signal(world: &mut World, events: &mut Vec<GameEvent>, event: GameEvent) {
    if world.outcome.is_some() {
        return;
    }
    match event {
        GameEvent::PlayerDied { .. } => {
            world.player.alive = false;
            world.outcome = Some(Outcome::Defeat);
        }
        GameEvent::GoalReached => world.outcome = Some(Outcome::Victory),
        _ => {}
    }
    events.push(event);
}

/// Movement, gravity, platform collision, jumping and world bounds
fn integrate_player(
    world: &mut World,
    input: &InputState,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) {
    let player = &mut world.player;

    // Horizontal intent
    if input.left {
        player.vel.x -= tuning.acceleration;
    } else if input.right {
        player.vel.x += tuning.acceleration;
    } else {
        player.vel.x *= tuning.friction;
    }
    player.vel.x = player.vel.x.clamp(-tuning.move_speed, tuning.move_speed);

    // Gravity (only downward speed is capped)
    player.vel.y = (player.vel.y + tuning.gravity).min(tuning.terminal_velocity);

    player.pos.x += player.vel.x;
    resolve_horizontal(player, &world.entities);

    player.pos.y += player.vel.y;
    let contact = resolve_vertical(player, &world.entities);

    if contact.grounded && input.jump {
        player.vel.y = tuning.jump_force;
    }

    player.pos.x = player.pos.x.max(0.0);
    if player.pos.y > world.height + tuning.fall_margin {
        log::debug!("Player fell out of the world at x={:.1}", player.pos.x);
        signal(
            world,
            events,
            GameEvent::PlayerDied {
                cause: DeathCause::FellOutOfWorld,
            },
        );
    }
}

/// Enemy patrol, stomp/hit resolution, coin pickup and goal detection,
/// in a single pass over the store
fn resolve_interactions(world: &mut World, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    for index in 0..world.entities.len() {
        let entity = &mut world.entities[index];
        if !entity.is_interactive() {
            continue;
        }

        match entity.kind {
            EntityKind::Enemy => {
                // Enemies walk forever in their initial direction
                entity.pos.x += entity.vel.x;

                if world.outcome.is_some() || !world.player.overlaps(entity) {
                    continue;
                }
                let enemy = entity.id;
                if is_stomp(&world.player, entity) {
                    entity.alive = false;
                    world.player.vel.y = tuning.jump_force * tuning.stomp_bounce;
                    log::debug!("Stomped enemy {:?}", enemy);
                    events.push(GameEvent::EnemyStomped { enemy });
                } else {
                    signal(
                        world,
                        events,
                        GameEvent::PlayerDied {
                            cause: DeathCause::HitByEnemy(enemy),
                        },
                    );
                }
            }
            EntityKind::Coin => {
                if world.outcome.is_some() || !world.player.overlaps(entity) {
                    continue;
                }
                entity.alive = false;
                events.push(GameEvent::CoinCollected {
                    coin: entity.id,
                    points: tuning.coin_points,
                });
            }
            EntityKind::Goal => {
                if world.outcome.is_none() && world.player.overlaps(entity) {
                    signal(world, events, GameEvent::GoalReached);
                }
            }
            _ => {}
        }
    }
}
