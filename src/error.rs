//! Top-level error type for startup and queue construction.
//!
//! Per-track playback failures live in [`crate::audio::EngineError`]; they are
//! logged and never abort the player.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    /// The configured music directory does not exist or is not a directory.
    #[error("cannot find an audio directory at {}", .0.display())]
    MissingDirectory(PathBuf),

    /// Nothing playable was found, so there is no queue to build.
    #[error("no supported audio files found")]
    EmptyQueue,

    /// No usable audio output device.
    #[error("failed to open the default audio output: {0}")]
    AudioOutput(#[from] rodio::StreamError),
}
