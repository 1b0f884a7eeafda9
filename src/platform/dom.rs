//! Browser collaborators
//!
//! Entities are absolutely positioned `<div>`s: enemies get the `eagle`
//! class under `#enemies`, projectiles the `ball` class under `#balls`.
//! The player's rise and fall are CSS transitions whose duration comes
//! from the simulation.

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use super::MenuState;
use crate::audio::{AudioManager, TRACK_SOURCE};
use crate::settings::Settings;
use crate::sim::{EntityId, EntityKind, Presenter, Renderer};

/// Draws the game with HTML elements
pub struct DomRenderer {
    document: Document,
    enemy_layer: Element,
    projectile_layer: Element,
    player: HtmlElement,
    nodes: HashMap<EntityId, HtmlElement>,
}

impl DomRenderer {
    /// Bind to `#enemies`, `#balls` and `#player`. `None` if the page lacks any of them.
    pub fn new(document: &Document) -> Option<Self> {
        let enemy_layer = document.get_element_by_id("enemies")?;
        let projectile_layer = document.get_element_by_id("balls")?;
        let player = document
            .get_element_by_id("player")?
            .dyn_into::<HtmlElement>()
            .ok()?;
        Some(Self {
            document: document.clone(),
            enemy_layer,
            projectile_layer,
            player,
            nodes: HashMap::new(),
        })
    }
}

fn set_style(el: &HtmlElement, name: &str, value: &str) {
    if el.style().set_property(name, value).is_err() {
        log::warn!("Failed to set style {}", name);
    }
}

fn place(el: &HtmlElement, pos: Vec2) {
    set_style(el, "left", &format!("{}px", pos.x));
    set_style(el, "bottom", &format!("{}px", pos.y));
}

impl Renderer for DomRenderer {
    fn entity_created(&mut self, id: EntityId, kind: EntityKind, pos: Vec2, size: Vec2) {
        let Some(node) = self
            .document
            .create_element("div")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            log::warn!("Failed to create element for entity {}", id);
            return;
        };
        let (class, layer) = match kind {
            EntityKind::Enemy => ("eagle", &self.enemy_layer),
            EntityKind::Projectile => ("ball", &self.projectile_layer),
        };
        let _ = node.class_list().add_1(class);
        set_style(&node, "width", &format!("{}px", size.x));
        set_style(&node, "height", &format!("{}px", size.y));
        place(&node, pos);
        if layer.append_child(&node).is_err() {
            log::warn!("Failed to attach entity {}", id);
            return;
        }
        self.nodes.insert(id, node);
    }

    fn entity_moved(&mut self, id: EntityId, pos: Vec2) {
        if let Some(node) = self.nodes.get(&id) {
            place(node, pos);
        }
    }

    fn entity_removed(&mut self, id: EntityId) {
        if let Some(node) = self.nodes.remove(&id) {
            node.remove();
        }
    }

    fn player_moved(&mut self, offset: f32, duration_ms: u64) {
        set_style(
            &self.player,
            "transition",
            &format!("bottom {}s", duration_ms as f64 / 1000.0),
        );
        set_style(&self.player, "bottom", &format!("{}px", offset));
    }
}

/// Score readout, start button, game-over menu and music
pub struct DomPresenter {
    score: Option<Element>,
    game_over_menu: Option<Element>,
    start_button: Option<Element>,
    menu: MenuState,
    audio: AudioManager,
}

impl DomPresenter {
    pub fn new(document: &Document, settings: &Settings) -> Self {
        let lookup = |selector: &str| {
            let el = document.query_selector(selector).ok().flatten();
            if el.is_none() {
                log::warn!("Missing page element {}", selector);
            }
            el
        };
        Self {
            score: lookup(".score-value"),
            game_over_menu: lookup("#gameOverMenu"),
            start_button: lookup("#start"),
            menu: MenuState::default(),
            audio: AudioManager::new(TRACK_SOURCE, settings),
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.audio.set_muted(muted);
    }

    fn sync_menu(&self) {
        if let Some(btn) = &self.start_button {
            let _ = btn.class_list().toggle_with_force("hide", !self.menu.start_button);
        }
        if let Some(menu) = &self.game_over_menu {
            let _ = menu.class_list().toggle_with_force("show", self.menu.game_over_menu);
        }
    }
}

impl Presenter for DomPresenter {
    fn game_started(&mut self) {
        self.menu.game_started();
        self.sync_menu();
        self.audio.play();
    }

    fn game_over(&mut self, score: u64) {
        self.menu.game_over();
        self.sync_menu();
        self.audio.pause();
        log::info!("Game over with score {}", score);
    }

    fn score_changed(&mut self, score: u64) {
        if let Some(el) = &self.score {
            el.set_text_content(Some(&score.to_string()));
        }
    }
}
