//! Session controller and game loop
//!
//! [`GameEngine`] owns every piece of mutable game state. Hosts feed it
//! input and elapsed time; it runs the due timers in order and queues
//! [`GameEvent`]s for the renderer and presenter.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::events::{self, GameEvent, Presenter, RemovalReason, Renderer};
use super::motion::{advance_enemies, advance_projectiles};
use super::scheduler::{Scheduler, TimerId};
use super::spawn::{spawn_projectile, spawn_wave};
use super::state::{Entity, Player, Session, SessionPhase, World};
use crate::tuning::Tuning;

/// Discrete player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Input {
    Jump,
    Fire,
}

/// Work the scheduler can hand back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Score,
    Spawn,
    EnemyMotion,
    ProjectileMotion,
    Gravity,
}

/// Serializable summary of the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub seed: u64,
    pub now_ms: u64,
    pub phase: SessionPhase,
    pub score: u64,
    pub runs: u32,
    pub player_offset: f32,
    pub enemies: usize,
    pub projectiles: usize,
}

/// The whole game: session, world, timers and pending events
pub struct GameEngine {
    tuning: Tuning,
    seed: u64,
    rng: Pcg32,
    scheduler: Scheduler<Task>,
    session: Session,
    world: World,
    /// Score, spawn and both motion timers of the running session
    loop_timers: Vec<TimerId>,
    gravity_timer: Option<TimerId>,
    events: Vec<GameEvent>,
}

impl GameEngine {
    /// Create an idle engine. The tuning is assumed valid (see [`Tuning::validate`]).
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let world = World::new(&tuning);
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
            scheduler: Scheduler::new(),
            session: Session::default(),
            world,
            loop_timers: Vec::with_capacity(4),
            gravity_timer: None,
            events: Vec::new(),
            tuning,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    pub fn score(&self) -> u64 {
        self.session.score
    }

    pub fn player(&self) -> &Player {
        &self.world.player
    }

    /// Player bottom offset at the current instant
    pub fn player_offset(&self) -> f32 {
        self.world.player.offset_at(self.now_ms())
    }

    pub fn enemies(&self) -> &[Entity] {
        &self.world.enemies
    }

    pub fn projectiles(&self) -> &[Entity] {
        &self.world.projectiles
    }

    /// Whether a post-jump fall is pending
    pub fn fall_pending(&self) -> bool {
        self.gravity_timer
            .is_some_and(|id| self.scheduler.is_pending(id))
    }

    /// Events queued since the last drain, oldest first
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Deliver all queued events to the collaborators
    pub fn dispatch(&mut self, renderer: &mut dyn Renderer, presenter: &mut dyn Presenter) {
        for event in self.events.drain(..) {
            events::route(&event, renderer, presenter);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            seed: self.seed,
            now_ms: self.now_ms(),
            phase: self.session.phase,
            score: self.session.score,
            runs: self.session.runs,
            player_offset: self.player_offset(),
            enemies: self.world.enemies.len(),
            projectiles: self.world.projectiles.len(),
        }
    }

    /// Begin a session: Idle or GameOver -> Running.
    ///
    /// Restarting after a game over clears leftover entities, grounds the
    /// player and reseeds the spawn RNG. Ignored while already running.
    pub fn start(&mut self) {
        match self.session.phase {
            SessionPhase::Running => {
                log::trace!("start ignored: session already running");
                return;
            }
            SessionPhase::GameOver => self.reset_world(),
            SessionPhase::Idle => {}
        }

        self.session.begin();
        let tuning = &self.tuning;
        self.loop_timers = vec![
            self.scheduler.every(tuning.score_interval_ms, Task::Score),
            self.scheduler.every(tuning.spawn_interval_ms, Task::Spawn),
            self.scheduler
                .every(tuning.enemy_motion_interval_ms, Task::EnemyMotion),
            self.scheduler
                .every(tuning.projectile_motion_interval_ms, Task::ProjectileMotion),
        ];

        self.events.push(GameEvent::GameStarted);
        self.events.push(GameEvent::ScoreChanged(0));
        log::info!(
            "Session {} started at {} ms (seed {})",
            self.session.runs,
            self.now_ms(),
            self.seed
        );
    }

    /// Stop the session: Running -> GameOver.
    ///
    /// Cancels the loop timers and reports the final score. Returns false
    /// (and does nothing) when the session is not running, so repeated
    /// hits never announce a second game over.
    pub fn end_game(&mut self) -> bool {
        if !self.session.finish() {
            return false;
        }
        for id in self.loop_timers.drain(..) {
            self.scheduler.cancel(id);
        }
        let score = self.session.score;
        self.events.push(GameEvent::GameOver { score });
        log::info!("Game over at {} ms with score {}", self.now_ms(), score);
        true
    }

    /// Raise the plane one step. Ignored unless running or when too close to the top.
    pub fn jump(&mut self) {
        if !self.is_running() {
            log::trace!("jump ignored: session not running");
            return;
        }
        let now = self.now_ms();
        let Some(target) = self.world.player.begin_jump(now, &self.tuning) else {
            log::trace!("jump ignored: player near the top");
            return;
        };
        // Last jump wins: only one fall may be pending
        if let Some(id) = self.gravity_timer.take() {
            self.scheduler.cancel(id);
        }
        self.gravity_timer = Some(self.scheduler.after(self.tuning.fall_delay_ms, Task::Gravity));
        self.events.push(GameEvent::PlayerMoved {
            offset: target,
            duration_ms: self.tuning.jump_duration_ms,
        });
    }

    /// Launch a projectile. Ignored unless running.
    pub fn fire(&mut self) {
        if !self.is_running() {
            log::trace!("fire ignored: session not running");
            return;
        }
        let id = spawn_projectile(&mut self.world, &self.tuning, &mut self.events);
        log::debug!("Projectile {} fired", id);
    }

    pub fn handle_input(&mut self, input: Input) {
        match input {
            Input::Jump => self.jump(),
            Input::Fire => self.fire(),
        }
    }

    /// Advance the clock by `elapsed_ms`, running every timer that falls due
    pub fn advance(&mut self, elapsed_ms: u64) {
        let until = self.now_ms().saturating_add(elapsed_ms);
        while let Some(task) = self.scheduler.pop_due(until) {
            self.run(task);
        }
        self.scheduler.advance_to(until);
    }

    fn run(&mut self, task: Task) {
        if task == Task::Gravity {
            self.gravity_timer = None;
            let now = self.now_ms();
            let ground = self.world.player.begin_fall(now, &self.tuning);
            self.events.push(GameEvent::PlayerMoved {
                offset: ground,
                duration_ms: self.tuning.fall_duration_ms,
            });
            return;
        }

        if !self.is_running() {
            log::trace!("{:?} tick ignored: session not running", task);
            return;
        }

        match task {
            Task::Score => {
                let score = self.session.award_point();
                self.events.push(GameEvent::ScoreChanged(score));
            }
            Task::Spawn => {
                spawn_wave(
                    &mut self.world,
                    self.session.score,
                    &mut self.rng,
                    &self.tuning,
                    &mut self.events,
                );
            }
            Task::EnemyMotion => {
                let now = self.now_ms();
                let hit = advance_enemies(
                    &mut self.world,
                    self.session.score,
                    now,
                    &self.tuning,
                    &mut self.events,
                );
                if hit {
                    self.end_game();
                }
            }
            Task::ProjectileMotion => {
                advance_projectiles(
                    &mut self.world,
                    self.session.score,
                    &self.tuning,
                    &mut self.events,
                );
            }
            Task::Gravity => {}
        }
    }

    /// Put an enemy at an exact spot, bypassing the spawn RNG
    #[cfg(test)]
    pub(crate) fn place_enemy(&mut self, x: f32, y: f32) -> super::state::EntityId {
        let id = self.world.next_entity_id();
        self.world.enemies.push(Entity {
            id,
            kind: super::state::EntityKind::Enemy,
            pos: glam::Vec2::new(x, y),
            size: glam::Vec2::new(self.tuning.enemy_width, self.tuning.enemy_height),
        });
        id
    }

    /// Sweep the previous session's leftovers before a restart
    fn reset_world(&mut self) {
        for entity in self.world.clear_entities() {
            self.events.push(GameEvent::EntityRemoved {
                id: entity.id,
                kind: entity.kind,
                reason: RemovalReason::Cleared,
            });
        }
        if let Some(id) = self.gravity_timer.take() {
            self.scheduler.cancel(id);
        }
        self.world.player = Player::grounded(&self.tuning);
        self.events.push(GameEvent::PlayerMoved {
            offset: self.tuning.ground_offset,
            duration_ms: 0,
        });
        self.rng = Pcg32::seed_from_u64(self.seed.wrapping_add(u64::from(self.session.runs)));
    }
}
