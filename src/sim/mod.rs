//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Virtual clock only (no wall-clock reads)
//! - Seeded RNG only
//! - Stable iteration order (spawn order, which is entity ID order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod engine;
pub mod events;
pub mod motion;
pub mod player;
pub mod scheduler;
pub mod spawn;
pub mod state;

pub use autopilot::Autopilot;
pub use collision::{BoundingBox, is_collision};
pub use engine::{GameEngine, Input, Snapshot};
pub use events::{GameEvent, Presenter, RemovalReason, Renderer, route};
pub use scheduler::{Scheduler, TimerId};
pub use state::{
    Entity, EntityId, EntityKind, Player, PlayerState, Session, SessionPhase, Transition, World,
};
