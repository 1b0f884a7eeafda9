//! Enemy waves and projectile creation

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::events::GameEvent;
use super::state::{Entity, EntityId, EntityKind, World};
use crate::tuning::Tuning;

/// Spawn one wave of enemies sized by the current score.
///
/// Returns the ids of the new enemies.
pub fn spawn_wave<R: Rng>(
    world: &mut World,
    score: u64,
    rng: &mut R,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) -> Vec<EntityId> {
    let count = tuning.enemies_per_wave(score);
    let ids: Vec<EntityId> = (0..count)
        .map(|_| spawn_enemy(world, rng, tuning, events))
        .collect();
    log::debug!("Spawned {} enemies at score {}", ids.len(), score);
    ids
}

/// Spawn a single enemy in a random lane, somewhere off the right edge
pub fn spawn_enemy<R: Rng>(
    world: &mut World,
    rng: &mut R,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) -> EntityId {
    let pos = Vec2::new(random_spawn_x(rng, tuning), random_lane(rng, tuning));
    let size = Vec2::new(tuning.enemy_width, tuning.enemy_height);
    push_entity(world, EntityKind::Enemy, pos, size, events)
}

/// Fire a projectile from the player's current offset
pub fn spawn_projectile(world: &mut World, tuning: &Tuning, events: &mut Vec<GameEvent>) -> EntityId {
    let pos = Vec2::new(
        tuning.projectile_origin_x,
        world.player.offset + tuning.projectile_lift,
    );
    let size = Vec2::new(tuning.projectile_width, tuning.projectile_height);
    push_entity(world, EntityKind::Projectile, pos, size, events)
}

/// Pick a lane uniformly from the lane table (duplicates weight the draw)
pub fn random_lane<R: Rng>(rng: &mut R, tuning: &Tuning) -> f32 {
    tuning
        .enemy_lanes
        .choose(rng)
        .copied()
        .unwrap_or(tuning.ground_offset)
}

/// Whole-pixel x uniformly inside the spawn range (inclusive)
pub fn random_spawn_x<R: Rng>(rng: &mut R, tuning: &Tuning) -> f32 {
    rng.random_range(tuning.enemy_spawn_min_x..=tuning.enemy_spawn_max_x) as f32
}

fn push_entity(
    world: &mut World,
    kind: EntityKind,
    pos: Vec2,
    size: Vec2,
    events: &mut Vec<GameEvent>,
) -> EntityId {
    let id = world.next_entity_id();
    let entity = Entity { id, kind, pos, size };
    match kind {
        EntityKind::Enemy => world.enemies.push(entity),
        EntityKind::Projectile => world.projectiles.push(entity),
    }
    events.push(GameEvent::EntitySpawned { id, kind, pos, size });
    id
}
