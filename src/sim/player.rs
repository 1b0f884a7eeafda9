//! Jump and gravity for the player's plane
//!
//! A jump raises the plane by a fixed step from wherever it currently is;
//! the fall back to the ground is scheduled by the engine after a short
//! delay. Both movements are transitions sampled on the engine clock.

use super::state::{Player, PlayerState, Transition};
use crate::tuning::Tuning;

impl Player {
    /// Whether a jump started at `now_ms` would be accepted
    pub fn can_jump(&self, now_ms: u64, tuning: &Tuning) -> bool {
        self.top_at(now_ms, tuning) >= tuning.jump_ceiling
    }

    /// Start rising one jump step above the current offset.
    ///
    /// Returns the new target offset, or `None` when the plane is already
    /// too close to the top (the request is dropped, not queued).
    pub fn begin_jump(&mut self, now_ms: u64, tuning: &Tuning) -> Option<f32> {
        if !self.can_jump(now_ms, tuning) {
            return None;
        }
        let current = self.offset_at(now_ms);
        let target = current + tuning.jump_step;
        self.transition = Some(Transition {
            from: current,
            to: target,
            started_ms: now_ms,
            duration_ms: tuning.jump_duration_ms,
        });
        self.offset = target;
        self.state = PlayerState::Jumping;
        Some(target)
    }

    /// Start descending to the ground from the current offset
    pub fn begin_fall(&mut self, now_ms: u64, tuning: &Tuning) -> f32 {
        let current = self.offset_at(now_ms);
        self.transition = Some(Transition {
            from: current,
            to: tuning.ground_offset,
            started_ms: now_ms,
            duration_ms: tuning.fall_duration_ms,
        });
        self.offset = tuning.ground_offset;
        self.state = PlayerState::Falling;
        tuning.ground_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_from_ground() {
        let tuning = Tuning::default();
        let mut player = Player::grounded(&tuning);

        let target = player.begin_jump(0, &tuning);
        assert_eq!(target, Some(200.0));
        assert_eq!(player.state, PlayerState::Jumping);
        assert_eq!(player.offset, 200.0);
        // Still on the ground at the instant of the jump
        assert_eq!(player.offset_at(0), 100.0);
        assert_eq!(player.offset_at(tuning.jump_duration_ms), 200.0);
    }

    #[test]
    fn test_jump_mid_rise_stacks_from_sampled_offset() {
        let tuning = Tuning::default();
        let mut player = Player::grounded(&tuning);
        player.begin_jump(0, &tuning);

        // Halfway through the first rise the plane is at 150
        let target = player.begin_jump(250, &tuning);
        assert_eq!(target, Some(250.0));
        assert_eq!(player.offset_at(250), 150.0);
    }

    #[test]
    fn test_jump_refused_near_top() {
        let tuning = Tuning::default();
        let mut player = Player::grounded(&tuning);
        // top = 600 - 510 - 50 = 40 < 50
        player.offset = 510.0;
        let before = player.clone();

        assert!(!player.can_jump(0, &tuning));
        assert_eq!(player.begin_jump(0, &tuning), None);
        assert_eq!(player.offset, before.offset);
        assert_eq!(player.state, before.state);
        assert_eq!(player.transition, before.transition);
    }

    #[test]
    fn test_jump_allowed_exactly_at_threshold() {
        let tuning = Tuning::default();
        let mut player = Player::grounded(&tuning);
        // top = 600 - 500 - 50 = 50, not closer than the ceiling
        player.offset = 500.0;
        assert!(player.can_jump(0, &tuning));
    }

    #[test]
    fn test_fall_returns_to_ground() {
        let tuning = Tuning::default();
        let mut player = Player::grounded(&tuning);
        player.begin_jump(0, &tuning);

        // Fall starts before the rise completes: from the sampled 180
        let ground = player.begin_fall(400, &tuning);
        assert_eq!(ground, tuning.ground_offset);
        assert!(player.is_falling());
        assert_eq!(player.offset_at(400), 180.0);
        assert_eq!(player.offset_at(1400), 140.0);
        assert_eq!(player.offset_at(2400), tuning.ground_offset);
    }
}
