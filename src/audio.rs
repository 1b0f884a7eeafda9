//! Background music
//!
//! A single looping track starts with each session and pauses on game
//! over. On the web it is an `<audio>` element; natively only the
//! play/pause state is tracked.

#[cfg(target_arch = "wasm32")]
use web_sys::HtmlAudioElement;

use crate::settings::Settings;

/// Path of the background track, relative to the page
pub const TRACK_SOURCE: &str = "sound.mp3";

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    track: Option<HtmlAudioElement>,
    volume: f32,
    muted: bool,
    playing: bool,
}

impl AudioManager {
    pub fn new(source: &str, settings: &Settings) -> Self {
        #[cfg(target_arch = "wasm32")]
        let track = match HtmlAudioElement::new_with_src(source) {
            Ok(el) => {
                el.set_loop(true);
                Some(el)
            }
            Err(_) => {
                log::warn!("Failed to create audio element - audio disabled");
                None
            }
        };
        #[cfg(not(target_arch = "wasm32"))]
        log::debug!("Audio track {} (native: state only)", source);

        let manager = Self {
            #[cfg(target_arch = "wasm32")]
            track,
            volume: settings.volume.clamp(0.0, 1.0),
            muted: settings.muted,
            playing: false,
        };
        manager.apply_volume();
        manager
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Mute/unmute the track
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.apply_volume();
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    /// Start (or resume) the track
    pub fn play(&mut self) {
        if !self.playing {
            self.playing = true;
            self.sync_track();
        }
    }

    /// Pause the track, keeping its position
    pub fn pause(&mut self) {
        if self.playing {
            self.playing = false;
            self.sync_track();
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn sync_track(&self) {
        let Some(track) = &self.track else { return };
        if self.playing {
            // A rejected promise (autoplay policy) only means silence
            let _ = track.play();
        } else {
            let _ = track.pause();
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn sync_track(&self) {
        log::debug!("Audio {}", if self.playing { "playing" } else { "paused" });
    }

    #[cfg(target_arch = "wasm32")]
    fn apply_volume(&self) {
        if let Some(track) = &self.track {
            track.set_volume(f64::from(self.effective_volume()));
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn apply_volume(&self) {}
}
