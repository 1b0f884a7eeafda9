//! Events the simulation reports to its collaborators
//!
//! The engine queues events while it runs; the host drains them once per
//! frame and routes them to a [`Renderer`] and a [`Presenter`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{EntityId, EntityKind};

/// Why an entity left play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalReason {
    /// Scrolled past the arena edge
    OutOfBounds,
    /// Enemy and projectile destroyed each other
    Destroyed,
    /// Swept away by a restart
    Cleared,
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EntitySpawned {
        id: EntityId,
        kind: EntityKind,
        pos: Vec2,
        size: Vec2,
    },
    EntityMoved {
        id: EntityId,
        pos: Vec2,
    },
    EntityRemoved {
        id: EntityId,
        kind: EntityKind,
        reason: RemovalReason,
    },
    /// Player heads for `offset`, reaching it after `duration_ms`
    PlayerMoved {
        offset: f32,
        duration_ms: u64,
    },
    GameStarted,
    ScoreChanged(u64),
    GameOver {
        score: u64,
    },
}

/// Draws entities where the simulation puts them
pub trait Renderer {
    fn entity_created(&mut self, id: EntityId, kind: EntityKind, pos: Vec2, size: Vec2);
    fn entity_moved(&mut self, id: EntityId, pos: Vec2);
    fn entity_removed(&mut self, id: EntityId);
    /// The renderer animates the player toward `offset` over `duration_ms`
    fn player_moved(&mut self, offset: f32, duration_ms: u64);
}

/// Menus, score display and audio
pub trait Presenter {
    fn game_started(&mut self);
    fn game_over(&mut self, score: u64);
    fn score_changed(&mut self, score: u64);
}

/// Hand one event to whichever collaborator consumes it
pub fn route(event: &GameEvent, renderer: &mut dyn Renderer, presenter: &mut dyn Presenter) {
    match *event {
        GameEvent::EntitySpawned { id, kind, pos, size } => {
            renderer.entity_created(id, kind, pos, size)
        }
        GameEvent::EntityMoved { id, pos } => renderer.entity_moved(id, pos),
        GameEvent::EntityRemoved { id, .. } => renderer.entity_removed(id),
        GameEvent::PlayerMoved {
            offset,
            duration_ms,
        } => renderer.player_moved(offset, duration_ms),
        GameEvent::GameStarted => presenter.game_started(),
        GameEvent::ScoreChanged(score) => presenter.score_changed(score),
        GameEvent::GameOver { score } => presenter.game_over(score),
    }
}
