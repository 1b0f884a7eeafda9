//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::BoundingBox;
use crate::tuning::Tuning;

/// Entity identifier, unique for the lifetime of an engine
pub type EntityId = u32;

/// Lifecycle of a play session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for the first start
    #[default]
    Idle,
    /// Timers running, input accepted
    Running,
    /// Player was hit; timers stopped, score frozen
    GameOver,
}

/// Run state and score of the current playthrough
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub phase: SessionPhase,
    pub score: u64,
    /// Number of sessions started on this engine
    pub runs: u32,
}

impl Session {
    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Enter Running with a fresh score
    pub fn begin(&mut self) {
        self.phase = SessionPhase::Running;
        self.score = 0;
        self.runs += 1;
    }

    /// Award one point, returning the new score
    pub fn award_point(&mut self) -> u64 {
        self.score += 1;
        self.score
    }

    /// Leave Running. Returns false if the session was not running.
    pub fn finish(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.phase = SessionPhase::GameOver;
        true
    }
}

/// Entity variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Obstacle scrolling right to left
    Enemy,
    /// Shot fired by the player, travelling left to right
    Projectile,
}

/// A moving sprite. `pos` is the bottom-left corner, `pos.y` measured up from the floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Entity {
    pub fn bounding_box(&self, tuning: &Tuning) -> BoundingBox {
        BoundingBox::of(self.pos, self.size, tuning.arena_height, tuning.collision_margin)
    }
}

/// Vertical motion state of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    /// Resting on the ground or descending toward it
    Falling,
    /// Rising after a jump, until the fall timer fires
    Jumping,
}

/// Linear interpolation of the player's offset over a time window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub from: f32,
    pub to: f32,
    pub started_ms: u64,
    pub duration_ms: u64,
}

impl Transition {
    /// Offset at `now_ms`, clamped to the endpoints
    pub fn sample(&self, now_ms: u64) -> f32 {
        let elapsed = now_ms.saturating_sub(self.started_ms);
        if self.duration_ms == 0 || elapsed >= self.duration_ms {
            return self.to;
        }
        let t = elapsed as f32 / self.duration_ms as f32;
        self.from + (self.to - self.from) * t
    }

    pub fn is_finished(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.started_ms) >= self.duration_ms
    }
}

/// The player's plane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Bottom offset the player was last placed at (the transition target)
    pub offset: f32,
    pub state: PlayerState,
    /// Movement in progress, if any
    pub transition: Option<Transition>,
}

impl Player {
    /// Player resting on the ground
    pub fn grounded(tuning: &Tuning) -> Self {
        Self {
            offset: tuning.ground_offset,
            state: PlayerState::Falling,
            transition: None,
        }
    }

    pub fn is_falling(&self) -> bool {
        self.state == PlayerState::Falling
    }

    /// Bottom offset actually reached at `now_ms`
    pub fn offset_at(&self, now_ms: u64) -> f32 {
        self.transition
            .map(|t| t.sample(now_ms))
            .unwrap_or(self.offset)
    }

    /// Distance from the arena top to the player's top edge at `now_ms`
    pub fn top_at(&self, now_ms: u64, tuning: &Tuning) -> f32 {
        tuning.arena_height - self.offset_at(now_ms) - tuning.player_height
    }

    pub fn bounding_box(&self, now_ms: u64, tuning: &Tuning) -> BoundingBox {
        BoundingBox::of(
            Vec2::new(tuning.player_x, self.offset_at(now_ms)),
            Vec2::new(tuning.player_width, tuning.player_height),
            tuning.arena_height,
            tuning.collision_margin,
        )
    }
}

/// Everything on screen: the player plus active enemies and projectiles
///
/// Both lists are kept in spawn order, which is also ascending id order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub player: Player,
    pub enemies: Vec<Entity>,
    pub projectiles: Vec<Entity>,
    next_id: EntityId,
}

impl World {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            player: Player::grounded(tuning),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Remove every entity, returning them in spawn order (enemies first)
    pub fn clear_entities(&mut self) -> Vec<Entity> {
        let mut cleared: Vec<Entity> = self.enemies.drain(..).collect();
        cleared.extend(self.projectiles.drain(..));
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_lifecycle() {
        let mut session = Session::default();
        assert_eq!(session.phase, SessionPhase::Idle);
        assert!(!session.finish());

        session.begin();
        assert!(session.is_running());
        assert_eq!(session.award_point(), 1);
        assert_eq!(session.award_point(), 2);

        assert!(session.finish());
        assert!(!session.finish());
        assert_eq!(session.phase, SessionPhase::GameOver);
        assert_eq!(session.score, 2);

        session.begin();
        assert_eq!(session.score, 0);
        assert_eq!(session.runs, 2);
    }

    #[test]
    fn test_transition_sampling() {
        let t = Transition {
            from: 100.0,
            to: 200.0,
            started_ms: 1000,
            duration_ms: 500,
        };
        assert_eq!(t.sample(900), 100.0);
        assert_eq!(t.sample(1000), 100.0);
        assert_eq!(t.sample(1250), 150.0);
        assert_eq!(t.sample(1500), 200.0);
        assert_eq!(t.sample(9999), 200.0);
        assert!(!t.is_finished(1499));
        assert!(t.is_finished(1500));

        let instant = Transition {
            duration_ms: 0,
            ..t
        };
        assert_eq!(instant.sample(1000), 200.0);
    }

    #[test]
    fn test_player_box_follows_transition() {
        let tuning = Tuning::default();
        let mut player = Player::grounded(&tuning);
        assert_eq!(player.offset_at(0), tuning.ground_offset);
        // 600 - 100 - 50
        assert_eq!(player.top_at(0, &tuning), 450.0);

        player.offset = 200.0;
        player.transition = Some(Transition {
            from: 100.0,
            to: 200.0,
            started_ms: 0,
            duration_ms: 100,
        });
        assert_eq!(player.offset_at(50), 150.0);
        let bb = player.bounding_box(50, &tuning);
        assert_eq!(bb.bottom, 600.0 - 150.0 - 10.0);
    }

    #[test]
    fn test_entity_ids_are_sequential() {
        let mut world = World::new(&Tuning::default());
        assert_eq!(world.next_entity_id(), 1);
        assert_eq!(world.next_entity_id(), 2);
    }
}
