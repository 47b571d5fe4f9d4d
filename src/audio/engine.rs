//! `rodio`-backed `PlaybackEngine`.
//!
//! The file is opened lazily on first play or seek so building one engine per
//! track stays cheap. Position is tracked as `base + sink.get_pos()`, where
//! `base` is the offset the current sink was created at.

use std::path::PathBuf;
use std::time::Duration;

use rodio::Sink;
use rodio::mixer::Mixer;
use tracing::{debug, trace};

use crate::library::metadata;

use super::sink::create_sink_at;
use super::types::{EngineEvent, EngineState, PlaybackEngine};

pub struct RodioEngine {
    path: PathBuf,
    mixer: Mixer,
    sink: Option<Sink>,
    state: EngineState,
    volume: f32,
    /// Offset the current sink starts at (or where the next one will start).
    base: Duration,
    total: Option<Duration>,
    probed: bool,
    last_reported: Option<Duration>,
    pending: Vec<EngineEvent>,
}

impl RodioEngine {
    pub fn new(path: PathBuf, mixer: Mixer) -> Self {
        Self {
            path,
            mixer,
            sink: None,
            state: EngineState::Idle,
            volume: 1.0,
            base: Duration::ZERO,
            total: None,
            probed: false,
            last_reported: None,
            pending: Vec::new(),
        }
    }

    /// Make sure a sink exists, opening the file at `base` if needed.
    /// Returns false (and queues an error event) when the file cannot be played.
    fn ensure_sink(&mut self) -> bool {
        if self.sink.is_some() {
            return true;
        }

        self.probe_once();

        match create_sink_at(&self.mixer, &self.path, self.base) {
            Ok(opened) => {
                opened.sink.set_volume(self.volume);
                if opened.total.is_some() {
                    self.total = opened.total;
                }
                self.sink = Some(opened.sink);
                true
            }
            Err(err) => {
                self.pending.push(EngineEvent::Error(err));
                false
            }
        }
    }

    fn probe_once(&mut self) {
        if self.probed {
            return;
        }
        self.probed = true;

        match metadata::probe(&self.path) {
            Ok(probe) => {
                if self.total.is_none() {
                    self.total = probe.duration;
                }
                self.pending.push(EngineEvent::MetadataChanged(probe.metadata));
            }
            Err(err) => {
                // Untagged or unusual files still play; the table just stays empty.
                debug!(path = %self.path.display(), error = %err, "no readable tags");
            }
        }
    }

    fn drop_sink(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }
}

impl PlaybackEngine for RodioEngine {
    fn play(&mut self) {
        if matches!(self.state, EngineState::Ended) {
            self.base = Duration::ZERO;
        }
        if !self.ensure_sink() {
            return;
        }
        if let Some(sink) = &self.sink {
            sink.play();
        }
        self.state = EngineState::Playing;
    }

    fn pause(&mut self) {
        // A track that starts paused still gets its metadata table.
        self.probe_once();
        if let Some(sink) = &self.sink {
            sink.pause();
        }
        self.state = EngineState::Paused;
    }

    fn stop(&mut self) {
        self.drop_sink();
        self.base = Duration::ZERO;
        self.last_reported = None;
        self.state = EngineState::Stopped;
    }

    fn seek(&mut self, position: Duration) {
        self.base = position;
        self.last_reported = None;
        self.probe_once();

        if self.sink.is_none() {
            // Opened at `base` on the next play.
            return;
        }

        // Rebuild the sink at the new offset, keeping play/pause as it was.
        self.drop_sink();
        if !self.ensure_sink() {
            return;
        }
        if self.state == EngineState::Playing {
            if let Some(sink) = &self.sink {
                sink.play();
            }
        }
        trace!(path = %self.path.display(), ?position, "seeked");
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(sink) = &self.sink {
            sink.set_volume(volume);
        }
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn position(&self) -> Duration {
        match &self.sink {
            Some(sink) => self.base + sink.get_pos(),
            None => self.base,
        }
    }

    fn total_duration(&self) -> Option<Duration> {
        self.total
    }

    fn state(&self) -> EngineState {
        self.state
    }

    fn poll(&mut self) -> Vec<EngineEvent> {
        if self.state == EngineState::Playing {
            if let Some(sink) = &self.sink {
                if sink.empty() {
                    self.drop_sink();
                    self.base = Duration::ZERO;
                    self.last_reported = None;
                    self.state = EngineState::Ended;
                    self.pending.push(EngineEvent::Ended);
                } else {
                    let pos = self.position();
                    if self.last_reported != Some(pos) {
                        self.last_reported = Some(pos);
                        self.pending.push(EngineEvent::PositionChanged(pos));
                    }
                }
            }
        }

        std::mem::take(&mut self.pending)
    }
}
