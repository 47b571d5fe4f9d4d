use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::audio::{EngineEvent, EngineState, PlaybackEngine};
use crate::error::PlayerError;
use crate::library::metadata_rows;

use super::display::{DisplaySurface, Intent};
use super::handle::PlayerHandle;
use super::subscription::{StreamKind, Subscription};

/// Fraction of the track already played.
///
/// Unknown or zero-length tracks report `0.0` instead of dividing by zero.
pub fn progress_fraction(position: Duration, total: Option<Duration>) -> f64 {
    match total {
        Some(total) if !total.is_zero() => {
            (position.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
        }
        _ => 0.0,
    }
}

/// Clamp a requested volume into `[0.0, 1.0]`; NaN counts as silence.
pub fn clamp_volume(fraction: f32) -> f32 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

/// Circular playback queue over a fixed list of handles.
///
/// Exactly one handle is active at a time; its position and metadata changes
/// reach the display through explicit subscriptions that are torn down before
/// the next handle is attached.
pub struct QueueController<E, D> {
    handles: Vec<PlayerHandle<E>>,
    active: usize,
    intent: Intent,
    volume: f32,
    position_sub: Option<Subscription>,
    metadata_sub: Option<Subscription>,
    next_subscription_id: u64,
    display: D,
}

impl<E: PlaybackEngine, D: DisplaySurface> QueueController<E, D> {
    /// Build a controller over `handles`, in order. Nothing is activated yet.
    pub fn new(handles: Vec<PlayerHandle<E>>, display: D) -> Result<Self, PlayerError> {
        if handles.is_empty() {
            return Err(PlayerError::EmptyQueue);
        }

        Ok(Self {
            handles,
            active: 0,
            intent: Intent::Playing,
            volume: 1.0,
            position_sub: None,
            metadata_sub: None,
            next_subscription_id: 0,
            display,
        })
    }

    /// Activate the first track at `volume`, then play it or leave it paused.
    pub fn start(&mut self, volume: f32, autoplay: bool) {
        self.volume = clamp_volume(volume);
        self.activate(0);
        self.intent = if autoplay {
            Intent::Playing
        } else {
            Intent::Paused
        };
        self.resume_intent();
        info!(tracks = self.track_count(), autoplay, "queue started");
    }

    pub fn track_count(&self) -> usize {
        self.handles.len()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &PlayerHandle<E> {
        &self.handles[self.active]
    }

    #[cfg(test)]
    pub fn handles(&self) -> &[PlayerHandle<E>] {
        &self.handles
    }

    pub fn intent(&self) -> Intent {
        self.intent
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Attach the handle at `index` (modulo queue length) to the display.
    ///
    /// Old subscriptions are detached first, the incoming handle is rewound to
    /// zero and the label, progress and metadata are refreshed before returning.
    pub fn activate(&mut self, index: usize) {
        let index = index % self.handles.len();
        self.detach_all();

        let outgoing = self.active;
        if outgoing != index && self.handles[outgoing].engine().state() == EngineState::Playing {
            self.handles[outgoing].engine_mut().pause();
        }

        self.active = index;
        self.handles[index].engine_mut().seek(Duration::ZERO);
        self.display.show_progress(0.0);

        // Seeking may have read the file's tags; store them before the snapshot.
        for event in self.handles[index].engine_mut().poll() {
            match event {
                EngineEvent::Ended => trace!(index, "dropping end reported before the rewind"),
                other => self.handle_event(index, other),
            }
        }

        let id = self.next_id();
        self.position_sub = Some(self.handles[index].attach(index, StreamKind::Position, id));

        let label = self.handles[index].track().label();
        self.display.show_now_playing(&label);

        self.display
            .show_metadata(metadata_rows(self.handles[index].metadata()));
        let id = self.next_id();
        self.metadata_sub = Some(self.handles[index].attach(index, StreamKind::Metadata, id));
        debug_assert_eq!(
            self.handles
                .iter()
                .filter(|h| h.live_subscriptions() > 0)
                .count(),
            1
        );

        debug!(index, track = %label, "activated");
    }

    /// Move to the next track (wrapping), keeping the current play/pause intent.
    pub fn advance(&mut self) {
        let next = (self.active + 1) % self.handles.len();
        self.handles[self.active].engine_mut().stop();
        self.activate(next);
        self.resume_intent();
    }

    /// Flip between playing and paused. Returns the new intent.
    pub fn toggle_play_pause(&mut self) -> Intent {
        if self.position_sub.is_none() {
            // Stopped: bring the track back before playing it again.
            self.activate(self.active);
            self.handles[self.active].engine_mut().set_volume(self.volume);
        }

        let engine = self.handles[self.active].engine_mut();
        self.intent = if engine.state() == EngineState::Playing {
            engine.pause();
            Intent::Paused
        } else {
            engine.play();
            Intent::Playing
        };
        self.display.show_intent(self.intent);
        self.intent
    }

    /// Pause the active track without ever starting it.
    ///
    /// Unlike `toggle_play_pause`, this also settles the intent when the engine
    /// never got going, e.g. because its file could not be opened.
    pub fn pause(&mut self) {
        let engine = self.handles[self.active].engine_mut();
        if engine.state() != EngineState::Stopped {
            engine.pause();
        }
        self.intent = Intent::Paused;
        self.display.show_intent(self.intent);
    }

    /// Halt the active track and rewind it. The queue position is kept.
    pub fn stop(&mut self) {
        self.detach_all();
        self.handles[self.active].engine_mut().stop();
        self.intent = Intent::Paused;
        self.display.show_progress(0.0);
        self.display.show_intent(self.intent);
    }

    /// Set the active track's volume. Out-of-range input is clamped.
    pub fn set_volume(&mut self, fraction: f32) -> f32 {
        self.volume = clamp_volume(fraction);
        self.handles[self.active]
            .engine_mut()
            .set_volume(self.volume);
        self.volume
    }

    /// Poll every engine and dispatch what it reported.
    pub fn tick(&mut self) {
        let mut events = Vec::new();
        for (index, handle) in self.handles.iter_mut().enumerate() {
            events.extend(
                handle
                    .engine_mut()
                    .poll()
                    .into_iter()
                    .map(|event| (index, event)),
            );
        }
        for (index, event) in events {
            self.handle_event(index, event);
        }
    }

    /// React to one event reported by the engine of the handle at `index`.
    pub fn handle_event(&mut self, index: usize, event: EngineEvent) {
        let Some(handle) = self.handles.get_mut(index) else {
            warn!(index, "event for a handle outside the queue");
            return;
        };

        match event {
            EngineEvent::PositionChanged(position) => {
                if !handle.is_subscribed(StreamKind::Position) {
                    trace!(index, "dropping position update from a detached handle");
                    return;
                }
                let fraction = progress_fraction(position, handle.engine().total_duration());
                self.display.show_progress(fraction);
            }
            EngineEvent::MetadataChanged(metadata) => {
                handle.set_metadata(metadata);
                if handle.is_subscribed(StreamKind::Metadata) {
                    self.display.show_metadata(metadata_rows(handle.metadata()));
                }
            }
            EngineEvent::Ended => {
                if index == self.active {
                    debug!(index, track = %handle.track().label(), "track ended");
                    self.advance();
                } else {
                    trace!(index, "ignoring end of a track that is not active");
                }
            }
            EngineEvent::Error(err) => {
                warn!(
                    index,
                    track = %handle.track().label(),
                    error = %err,
                    "playback engine error"
                );
            }
        }
    }

    fn resume_intent(&mut self) {
        let engine = self.handles[self.active].engine_mut();
        engine.set_volume(self.volume);
        match self.intent {
            Intent::Playing => engine.play(),
            Intent::Paused => engine.pause(),
        }
        self.display.show_intent(self.intent);
    }

    fn detach_all(&mut self) {
        for sub in [self.position_sub.take(), self.metadata_sub.take()]
            .into_iter()
            .flatten()
        {
            let index = sub.handle();
            self.handles[index].detach(sub);
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_subscription_id += 1;
        self.next_subscription_id
    }
}
