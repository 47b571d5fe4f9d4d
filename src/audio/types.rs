//! Audio-related small types and the engine seam.
//!
//! This module defines the per-track engine state machine, the events an
//! engine reports back, its error type and the `PlaybackEngine` trait the
//! queue drives.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::library::Metadata;

/// Lifecycle of a single engine instance.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum EngineState {
    /// Created (or stopped and re-activated) but never started.
    #[default]
    Idle,
    Playing,
    Paused,
    /// Halted explicitly; position is back at zero.
    Stopped,
    /// Reached the end of the media.
    Ended,
}

/// Something an engine observed since the last `poll`.
#[derive(Debug)]
pub enum EngineEvent {
    /// The playback position moved.
    PositionChanged(Duration),
    /// More metadata became available for the track.
    MetadataChanged(Metadata),
    /// The media played to its end. Reported once per completion.
    Ended,
    /// Opening or decoding failed. The engine keeps its previous state.
    Error(EngineError),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}

/// One track's playback engine.
///
/// Calls are fire-and-forget: results show up later through `poll`.
pub trait PlaybackEngine {
    fn play(&mut self);
    fn pause(&mut self);
    /// Halt playback and rewind to zero.
    fn stop(&mut self);
    fn seek(&mut self, position: Duration);
    fn set_volume(&mut self, volume: f32);
    fn volume(&self) -> f32;
    fn position(&self) -> Duration;
    /// Total length, when known.
    fn total_duration(&self) -> Option<Duration>;
    fn state(&self) -> EngineState;
    /// Drain the events observed since the previous call.
    fn poll(&mut self) -> Vec<EngineEvent>;
}
