use std::path::{Path, PathBuf};

use rodio::mixer::Mixer;
use tracing::info;

use crate::app::App;
use crate::audio::RodioEngine;
use crate::config;
use crate::error::PlayerError;
use crate::library::{Track, scan};
use crate::queue::{PlayerHandle, QueueController};

pub type Controller = QueueController<RodioEngine, App>;

/// Directory to play: the command-line argument, then `playback.default_dir`,
/// then the working directory.
pub fn resolve_music_dir(arg: Option<String>, settings: &config::Settings) -> PathBuf {
    arg.or_else(|| settings.playback.default_dir.clone())
        .map(PathBuf::from)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Collect the playable files under `dir`.
pub fn scan_library(dir: &Path, settings: &config::Settings) -> Result<Vec<Track>, PlayerError> {
    let tracks = scan(dir, &settings.library)?;
    info!(dir = %dir.display(), tracks = tracks.len(), "library scanned");
    Ok(tracks)
}

/// Give every track its own engine on `mixer` and start the queue.
pub fn build_controller(
    dir: &Path,
    tracks: Vec<Track>,
    mixer: &Mixer,
    settings: &config::Settings,
) -> Result<Controller, PlayerError> {
    let mut app = App::new(tracks.len());
    app.set_current_dir(dir.display().to_string());

    let handles = tracks
        .into_iter()
        .map(|track| {
            let engine = RodioEngine::new(track.path.clone(), mixer.clone());
            PlayerHandle::new(track, engine)
        })
        .collect();

    let mut controller = QueueController::new(handles, app)?;
    controller.start(settings.playback.initial_volume, settings.playback.autoplay);
    Ok(controller)
}
