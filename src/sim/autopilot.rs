//! Demo controller that plays the game on its own
//!
//! Looks at the nearest enemy still ahead of the plane: shoots it when it
//! sits in the shot lane, jumps when it is about to hit and cannot be shot.

use glam::Vec2;

use super::collision::BoundingBox;
use super::engine::{GameEngine, Input};

/// Tuning for the demo controller
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Ignore enemies farther than this past the plane's nose
    pub lookahead: f32,
    /// Jump when a threat is closer than this to the plane's nose
    pub panic_distance: f32,
    pub fire_cooldown_ms: u64,
    last_shot_ms: Option<u64>,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            lookahead: 700.0,
            panic_distance: 150.0,
            fire_cooldown_ms: 150,
            last_shot_ms: None,
        }
    }
}

impl Autopilot {
    /// Pick an input for the current instant, if any
    pub fn decide(&mut self, engine: &GameEngine) -> Option<Input> {
        if !engine.is_running() {
            return None;
        }
        let tuning = engine.tuning();
        let now = engine.now_ms();
        let nose = tuning.player_x + tuning.player_width;

        let threat = engine
            .enemies()
            .iter()
            .filter(|e| e.pos.x + e.size.x >= tuning.player_x && e.pos.x - nose < self.lookahead)
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))?;
        let threat_box = threat.bounding_box(tuning);

        let shot_box = BoundingBox::of(
            Vec2::new(threat.pos.x, engine.player().offset + tuning.projectile_lift),
            Vec2::new(tuning.projectile_width, tuning.projectile_height),
            tuning.arena_height,
            tuning.collision_margin,
        );
        let cooled = self
            .last_shot_ms
            .is_none_or(|t| now.saturating_sub(t) >= self.fire_cooldown_ms);
        if cooled && vertical_overlap(&shot_box, &threat_box) {
            self.last_shot_ms = Some(now);
            return Some(Input::Fire);
        }

        let player_box = engine.player().bounding_box(now, tuning);
        if threat.pos.x - nose < self.panic_distance && vertical_overlap(&player_box, &threat_box) {
            return Some(Input::Jump);
        }
        None
    }
}

fn vertical_overlap(a: &BoundingBox, b: &BoundingBox) -> bool {
    !(a.bottom < b.top || a.top > b.bottom)
}
