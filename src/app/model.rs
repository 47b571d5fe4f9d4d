//! Application model: what the terminal currently shows.
//!
//! The queue controller writes into `App` through `DisplaySurface`; `ui::draw`
//! only reads it.

use crate::library::MetadataRow;
use crate::queue::{DisplaySurface, Intent};

/// The main application model.
#[derive(Debug, Default)]
pub struct App {
    /// Name of the active track.
    pub now_playing: String,
    /// Played fraction of the active track, `0.0..=1.0`.
    pub progress: f64,
    pub metadata: Vec<MetadataRow>,
    pub intent: Intent,
    pub track_count: usize,
    pub current_dir: Option<String>,
}

impl App {
    pub fn new(track_count: usize) -> Self {
        Self {
            track_count,
            ..Self::default()
        }
    }

    /// Record the scanned directory in the app state.
    pub fn set_current_dir(&mut self, dir: String) {
        self.current_dir = Some(dir);
    }

    /// Text for the play/pause button.
    pub fn play_button_label(&self) -> &'static str {
        self.intent.button_label()
    }
}

impl DisplaySurface for App {
    fn show_now_playing(&mut self, label: &str) {
        self.now_playing = label.to_string();
    }

    fn show_progress(&mut self, fraction: f64) {
        // The gauge widget panics outside [0, 1].
        self.progress = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    fn show_metadata(&mut self, rows: Vec<MetadataRow>) {
        self.metadata = rows;
    }

    fn show_intent(&mut self, intent: Intent) {
        self.intent = intent;
    }
}
