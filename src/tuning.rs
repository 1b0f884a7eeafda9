//! Data-driven game balance
//!
//! Every gameplay number lives in [`Tuning`]. The defaults reproduce the
//! original game; a JSON file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Gameplay balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    /// Right boundary; projectiles are removed once they reach it
    pub arena_width: f32,
    pub arena_height: f32,
    pub collision_margin: f32,

    // === Player ===
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub ground_offset: f32,
    pub jump_step: f32,
    pub jump_ceiling: f32,
    pub jump_duration_ms: u64,
    pub fall_delay_ms: u64,
    pub fall_duration_ms: u64,

    // === Enemies ===
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub enemy_lanes: Vec<f32>,
    pub enemy_spawn_min_x: u32,
    pub enemy_spawn_max_x: u32,
    pub enemy_step: f32,
    pub speed_score_divisor: f32,
    pub score_per_extra_enemy: u64,

    // === Projectiles ===
    pub projectile_width: f32,
    pub projectile_height: f32,
    pub projectile_origin_x: f32,
    pub projectile_lift: f32,
    pub projectile_step: f32,

    // === Cadences ===
    pub score_interval_ms: u64,
    pub spawn_interval_ms: u64,
    pub enemy_motion_interval_ms: u64,
    pub projectile_motion_interval_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            collision_margin: COLLISION_MARGIN,

            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            ground_offset: GROUND_OFFSET,
            jump_step: JUMP_STEP,
            jump_ceiling: JUMP_CEILING,
            jump_duration_ms: JUMP_DURATION_MS,
            fall_delay_ms: FALL_DELAY_MS,
            fall_duration_ms: FALL_DURATION_MS,

            enemy_width: ENEMY_WIDTH,
            enemy_height: ENEMY_HEIGHT,
            enemy_lanes: ENEMY_LANES.to_vec(),
            enemy_spawn_min_x: ENEMY_SPAWN_MIN_X,
            enemy_spawn_max_x: ENEMY_SPAWN_MAX_X,
            enemy_step: ENEMY_STEP,
            speed_score_divisor: SPEED_SCORE_DIVISOR,
            score_per_extra_enemy: SCORE_PER_EXTRA_ENEMY,

            projectile_width: PROJECTILE_WIDTH,
            projectile_height: PROJECTILE_HEIGHT,
            projectile_origin_x: PROJECTILE_ORIGIN_X,
            projectile_lift: PROJECTILE_LIFT,
            projectile_step: PROJECTILE_STEP,

            score_interval_ms: SCORE_INTERVAL_MS,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            enemy_motion_interval_ms: ENEMY_MOTION_INTERVAL_MS,
            projectile_motion_interval_ms: PROJECTILE_MOTION_INTERVAL_MS,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let cadences = [
            ("score_interval_ms", self.score_interval_ms),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("enemy_motion_interval_ms", self.enemy_motion_interval_ms),
            ("projectile_motion_interval_ms", self.projectile_motion_interval_ms),
        ];
        for (field, value) in cadences {
            if value == 0 {
                return Err(invalid(field, "interval must be at least 1 ms"));
            }
        }
        if self.enemy_lanes.is_empty() {
            return Err(invalid("enemy_lanes", "at least one lane is required"));
        }
        if self.enemy_spawn_min_x > self.enemy_spawn_max_x {
            return Err(invalid(
                "enemy_spawn_min_x",
                format!(
                    "{} exceeds enemy_spawn_max_x {}",
                    self.enemy_spawn_min_x, self.enemy_spawn_max_x
                ),
            ));
        }
        if self.score_per_extra_enemy == 0 {
            return Err(invalid("score_per_extra_enemy", "must be positive"));
        }
        if !(self.speed_score_divisor > 0.0) {
            return Err(invalid("speed_score_divisor", "must be positive"));
        }
        if !(self.arena_width > 0.0) {
            return Err(invalid("arena_width", "must be positive"));
        }
        if !(self.arena_height > 0.0) {
            return Err(invalid("arena_height", "must be positive"));
        }
        Ok(())
    }

    /// Distance an enemy travels per motion tick at the given score
    pub fn enemy_speed(&self, score: u64) -> f32 {
        self.enemy_step + score as f32 / self.speed_score_divisor
    }

    /// Distance a projectile travels per motion tick at the given score
    pub fn projectile_speed(&self, score: u64) -> f32 {
        self.projectile_step + score as f32 / self.speed_score_divisor
    }

    /// Enemies created by one spawn tick at the given score
    pub fn enemies_per_wave(&self, score: u64) -> u64 {
        score / self.score_per_extra_enemy + 1
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.into(),
    }
}
