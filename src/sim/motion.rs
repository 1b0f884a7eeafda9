//! Per-tick movement of enemies and projectiles
//!
//! Each mover checks the arena boundary before testing collisions, so an
//! entity leaving play this tick is never collision-tested. Removal is
//! immediate: a removed entity is gone from its list before the next
//! entity is processed.

use super::collision::is_collision;
use super::events::{GameEvent, RemovalReason};
use super::state::{EntityKind, World};
use crate::tuning::Tuning;

/// Scroll every enemy left one step.
///
/// Returns true if any enemy touched the player. Every enemy is still
/// advanced in that case; ending the session is the caller's job.
pub fn advance_enemies(
    world: &mut World,
    score: u64,
    now_ms: u64,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) -> bool {
    let step = tuning.enemy_speed(score);
    let player_box = world.player.bounding_box(now_ms, tuning);
    let mut player_hit = false;

    world.enemies.retain_mut(|enemy| {
        enemy.pos.x -= step;
        if enemy.pos.x <= 0.0 {
            log::debug!("Enemy {} left the arena", enemy.id);
            events.push(GameEvent::EntityRemoved {
                id: enemy.id,
                kind: EntityKind::Enemy,
                reason: RemovalReason::OutOfBounds,
            });
            return false;
        }
        events.push(GameEvent::EntityMoved {
            id: enemy.id,
            pos: enemy.pos,
        });
        if is_collision(&player_box, &enemy.bounding_box(tuning)) {
            log::debug!("Enemy {} hit the player at x={:.1}", enemy.id, enemy.pos.x);
            player_hit = true;
        }
        true
    });

    player_hit
}

/// Push every projectile right one step, destroying the first enemy each one hits.
///
/// Enemies are scanned in spawn order. Returns the number of enemies destroyed.
pub fn advance_projectiles(
    world: &mut World,
    score: u64,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) -> usize {
    let step = tuning.projectile_speed(score);
    let World {
        enemies,
        projectiles,
        ..
    } = world;
    let mut destroyed = 0;

    projectiles.retain_mut(|shot| {
        shot.pos.x += step;
        if shot.pos.x >= tuning.arena_width {
            events.push(GameEvent::EntityRemoved {
                id: shot.id,
                kind: EntityKind::Projectile,
                reason: RemovalReason::OutOfBounds,
            });
            return false;
        }

        let shot_box = shot.bounding_box(tuning);
        let target = enemies
            .iter()
            .position(|enemy| is_collision(&enemy.bounding_box(tuning), &shot_box));
        if let Some(idx) = target {
            let enemy = enemies.remove(idx);
            log::debug!("Projectile {} destroyed enemy {}", shot.id, enemy.id);
            events.push(GameEvent::EntityRemoved {
                id: enemy.id,
                kind: EntityKind::Enemy,
                reason: RemovalReason::Destroyed,
            });
            events.push(GameEvent::EntityRemoved {
                id: shot.id,
                kind: EntityKind::Projectile,
                reason: RemovalReason::Destroyed,
            });
            destroyed += 1;
            return false;
        }

        events.push(GameEvent::EntityMoved {
            id: shot.id,
            pos: shot.pos,
        });
        true
    });

    destroyed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Entity;
    use glam::Vec2;

    fn enemy(world: &mut World, tuning: &Tuning, x: f32, y: f32) -> u32 {
        let id = world.next_entity_id();
        world.enemies.push(Entity {
            id,
            kind: EntityKind::Enemy,
            pos: Vec2::new(x, y),
            size: Vec2::new(tuning.enemy_width, tuning.enemy_height),
        });
        id
    }

    fn shot(world: &mut World, tuning: &Tuning, x: f32, y: f32) -> u32 {
        let id = world.next_entity_id();
        world.projectiles.push(Entity {
            id,
            kind: EntityKind::Projectile,
            pos: Vec2::new(x, y),
            size: Vec2::new(tuning.projectile_width, tuning.projectile_height),
        });
        id
    }

    fn removed(events: &[GameEvent]) -> Vec<(u32, RemovalReason)> {
        events
            .iter()
            .filter_map(|e| match *e {
                GameEvent::EntityRemoved { id, reason, .. } => Some((id, reason)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_enemy_moves_left_with_score_scaling() {
        let tuning = Tuning::default();
        let mut world = World::new(&tuning);
        enemy(&mut world, &tuning, 1000.0, 300.0);
        let mut events = Vec::new();

        assert!(!advance_enemies(&mut world, 0, 0, &tuning, &mut events));
        assert_eq!(world.enemies[0].pos.x, 996.0);

        assert!(!advance_enemies(&mut world, 130, 0, &tuning, &mut events));
        assert_eq!(world.enemies[0].pos.x, 990.0);
    }

    #[test]
    fn test_enemy_leaving_left_edge_is_removed_without_collision_test() {
        let tuning = Tuning::default();
        let mut world = World::new(&tuning);
        // Stretch the player across the whole arena so any test would hit
        let tuning = Tuning {
            player_x: -100.0,
            player_width: 2000.0,
            player_height: 600.0,
            ..tuning
        };
        let id = enemy(&mut world, &tuning, 3.0, 100.0);
        let mut events = Vec::new();

        let hit = advance_enemies(&mut world, 0, 0, &tuning, &mut events);
        assert!(!hit, "exiting enemy must not be collision-tested");
        assert!(world.enemies.is_empty());
        assert_eq!(removed(&events), vec![(id, RemovalReason::OutOfBounds)]);
    }

    #[test]
    fn test_enemy_reaching_zero_is_removed() {
        let tuning = Tuning::default();
        let mut world = World::new(&tuning);
        enemy(&mut world, &tuning, 4.0, 300.0);
        let mut events = Vec::new();
        advance_enemies(&mut world, 0, 0, &tuning, &mut events);
        assert!(world.enemies.is_empty());
    }

    #[test]
    fn test_enemy_hitting_player_reports_hit_and_keeps_moving_others() {
        let tuning = Tuning::default();
        let mut world = World::new(&tuning);
        // Same lane as the grounded player, overlapping horizontally
        enemy(&mut world, &tuning, 150.0, 100.0);
        enemy(&mut world, &tuning, 1200.0, 300.0);
        let mut events = Vec::new();

        assert!(advance_enemies(&mut world, 0, 0, &tuning, &mut events));
        assert_eq!(world.enemies.len(), 2);
        assert_eq!(world.enemies[1].pos.x, 1196.0);
    }

    #[test]
    fn test_enemy_in_higher_lane_passes_grounded_player() {
        let tuning = Tuning::default();
        let mut world = World::new(&tuning);
        enemy(&mut world, &tuning, 150.0, 250.0);
        let mut events = Vec::new();
        assert!(!advance_enemies(&mut world, 0, 0, &tuning, &mut events));
    }

    #[test]
    fn test_projectile_moves_right_and_exits() {
        let tuning = Tuning::default();
        let mut world = World::new(&tuning);
        let id = shot(&mut world, &tuning, 1490.0, 120.0);
        let mut events = Vec::new();

        advance_projectiles(&mut world, 0, &tuning, &mut events);
        assert_eq!(world.projectiles[0].pos.x, 1493.0);
        advance_projectiles(&mut world, 0, &tuning, &mut events);
        advance_projectiles(&mut world, 0, &tuning, &mut events);
        assert_eq!(world.projectiles[0].pos.x, 1499.0);
        advance_projectiles(&mut world, 0, &tuning, &mut events);
        assert!(world.projectiles.is_empty());
        assert_eq!(removed(&events), vec![(id, RemovalReason::OutOfBounds)]);
    }

    #[test]
    fn test_projectile_exit_follows_arena_width() {
        let tuning = Tuning {
            arena_width: 800.0,
            ..Tuning::default()
        };
        let mut world = World::new(&tuning);
        let id = shot(&mut world, &tuning, 798.0, 120.0);
        let mut events = Vec::new();

        advance_projectiles(&mut world, 0, &tuning, &mut events);
        assert!(world.projectiles.is_empty());
        assert_eq!(removed(&events), vec![(id, RemovalReason::OutOfBounds)]);
    }

    #[test]
    fn test_projectile_destroys_overlapping_enemy_once() {
        let tuning = Tuning::default();
        let mut world = World::new(&tuning);
        let target = enemy(&mut world, &tuning, 600.0, 100.0);
        let bullet = shot(&mut world, &tuning, 610.0, 120.0);
        let mut events = Vec::new();

        assert_eq!(advance_projectiles(&mut world, 0, &tuning, &mut events), 1);
        assert!(world.enemies.is_empty());
        assert!(world.projectiles.is_empty());
        assert_eq!(
            removed(&events),
            vec![
                (target, RemovalReason::Destroyed),
                (bullet, RemovalReason::Destroyed)
            ]
        );

        // Nothing left to remove a second time
        events.clear();
        assert_eq!(advance_projectiles(&mut world, 0, &tuning, &mut events), 0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_projectile_stops_at_first_enemy_in_spawn_order() {
        let tuning = Tuning::default();
        let mut world = World::new(&tuning);
        let first = enemy(&mut world, &tuning, 600.0, 100.0);
        let second = enemy(&mut world, &tuning, 605.0, 100.0);
        shot(&mut world, &tuning, 610.0, 120.0);
        let mut events = Vec::new();

        assert_eq!(advance_projectiles(&mut world, 0, &tuning, &mut events), 1);
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.enemies[0].id, second);
        assert!(removed(&events).contains(&(first, RemovalReason::Destroyed)));
    }

    #[test]
    fn test_two_projectiles_cannot_destroy_the_same_enemy() {
        let tuning = Tuning::default();
        let mut world = World::new(&tuning);
        enemy(&mut world, &tuning, 600.0, 100.0);
        shot(&mut world, &tuning, 610.0, 120.0);
        let survivor = shot(&mut world, &tuning, 612.0, 120.0);
        let mut events = Vec::new();

        assert_eq!(advance_projectiles(&mut world, 0, &tuning, &mut events), 1);
        assert_eq!(world.projectiles.len(), 1);
        assert_eq!(world.projectiles[0].id, survivor);
    }

    #[test]
    fn test_projectile_misses_enemy_in_other_lane() {
        let tuning = Tuning::default();
        let mut world = World::new(&tuning);
        enemy(&mut world, &tuning, 600.0, 300.0);
        shot(&mut world, &tuning, 610.0, 120.0);
        let mut events = Vec::new();

        assert_eq!(advance_projectiles(&mut world, 0, &tuning, &mut events), 0);
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.projectiles.len(), 1);
    }
}
