//! In-memory collaborators
//!
//! Keeps the scene the renderer would draw and reports lifecycle changes
//! through `log`. Used by the native demo and by tests.

use std::collections::BTreeMap;

use glam::Vec2;

use super::MenuState;
use crate::audio::{AudioManager, TRACK_SOURCE};
use crate::settings::Settings;
use crate::sim::{EntityId, EntityKind, Presenter, Renderer};

/// A sprite as the renderer last placed it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub size: Vec2,
}

/// Scene graph without a screen
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    pub sprites: BTreeMap<EntityId, Sprite>,
    pub player_offset: f32,
    /// Duration of the most recent player transition
    pub player_transition_ms: u64,
    /// Moves reported for ids that are not on screen
    pub stray_updates: u32,
}

impl HeadlessRenderer {
    pub fn count(&self, kind: EntityKind) -> usize {
        self.sprites.values().filter(|s| s.kind == kind).count()
    }
}

impl Renderer for HeadlessRenderer {
    fn entity_created(&mut self, id: EntityId, kind: EntityKind, pos: Vec2, size: Vec2) {
        self.sprites.insert(id, Sprite { kind, pos, size });
    }

    fn entity_moved(&mut self, id: EntityId, pos: Vec2) {
        match self.sprites.get_mut(&id) {
            Some(sprite) => sprite.pos = pos,
            None => self.stray_updates += 1,
        }
    }

    fn entity_removed(&mut self, id: EntityId) {
        if self.sprites.remove(&id).is_none() {
            self.stray_updates += 1;
        }
    }

    fn player_moved(&mut self, offset: f32, duration_ms: u64) {
        self.player_offset = offset;
        self.player_transition_ms = duration_ms;
    }
}

/// Score readout, menu state and music
pub struct HeadlessPresenter {
    pub audio: AudioManager,
    pub score: u64,
    pub games_started: u32,
    pub game_overs: u32,
    pub menu: MenuState,
}

impl HeadlessPresenter {
    pub fn new(settings: &Settings) -> Self {
        Self {
            audio: AudioManager::new(TRACK_SOURCE, settings),
            score: 0,
            games_started: 0,
            game_overs: 0,
            menu: MenuState::default(),
        }
    }
}

impl Presenter for HeadlessPresenter {
    fn game_started(&mut self) {
        self.games_started += 1;
        self.menu.game_started();
        self.audio.play();
        log::info!("Game {} started", self.games_started);
    }

    fn game_over(&mut self, score: u64) {
        self.game_overs += 1;
        self.menu.game_over();
        self.audio.pause();
        log::info!("GAME OVER - final score {}", score);
    }

    fn score_changed(&mut self, score: u64) {
        self.score = score;
        if score > 0 && score % 50 == 0 {
            log::info!("Score {}", score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameEngine, GameEvent};
    use crate::tuning::Tuning;

    #[test]
    fn test_scene_mirrors_engine() {
        let mut engine = GameEngine::new(Tuning::default(), 99);
        let mut renderer = HeadlessRenderer::default();
        let mut presenter = HeadlessPresenter::new(&Settings::default());

        engine.start();
        engine.advance(2500);
        engine.fire();
        engine.jump();
        engine.advance(50);
        engine.dispatch(&mut renderer, &mut presenter);

        assert_eq!(renderer.count(EntityKind::Enemy), engine.enemies().len());
        assert_eq!(renderer.count(EntityKind::Projectile), engine.projectiles().len());
        for enemy in engine.enemies() {
            assert_eq!(renderer.sprites[&enemy.id].pos, enemy.pos);
        }
        assert_eq!(renderer.player_offset, 200.0);
        assert_eq!(renderer.player_transition_ms, 500);
        assert_eq!(renderer.stray_updates, 0);
        assert_eq!(presenter.score, engine.score());
        assert!(presenter.audio.is_playing());
        assert!(engine.pending_events().is_empty());
    }

    #[test]
    fn test_game_over_shows_menu_once_and_pauses_audio() {
        let mut engine = GameEngine::new(Tuning::default(), 5);
        let mut renderer = HeadlessRenderer::default();
        let mut presenter = HeadlessPresenter::new(&Settings::default());

        engine.start();
        engine.end_game();
        engine.end_game();
        engine.dispatch(&mut renderer, &mut presenter);

        assert_eq!(presenter.games_started, 1);
        assert_eq!(presenter.game_overs, 1);
        assert!(presenter.menu.game_over_menu);
        assert!(presenter.menu.start_button, "start button must come back to restart");
        assert!(!presenter.audio.is_playing());

        engine.start();
        assert!(engine.pending_events().contains(&GameEvent::GameStarted));
        engine.dispatch(&mut renderer, &mut presenter);
        assert!(!presenter.menu.game_over_menu);
        assert!(!presenter.menu.start_button);
        assert!(presenter.audio.is_playing());
    }

    #[test]
    fn test_restart_through_start_button_clears_scene() {
        let mut engine = GameEngine::new(Tuning::default(), 21);
        let mut renderer = HeadlessRenderer::default();
        let mut presenter = HeadlessPresenter::new(&Settings::default());
        assert!(presenter.menu.start_button);

        engine.start();
        engine.advance(2100);
        engine.fire();
        engine.end_game();
        engine.dispatch(&mut renderer, &mut presenter);
        assert!(!renderer.sprites.is_empty());

        // Clicking the visible start button calls start() again
        assert!(presenter.menu.start_button);
        engine.start();
        engine.dispatch(&mut renderer, &mut presenter);

        assert!(engine.is_running());
        assert_eq!(engine.score(), 0);
        assert!(renderer.sprites.is_empty());
        assert_eq!(renderer.stray_updates, 0);
        assert_eq!(presenter.games_started, 2);
        assert_eq!(presenter.score, 0);
        assert!(!presenter.menu.start_button);
    }
}
