//! Engine and display doubles shared by the queue and runtime tests.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use crate::audio::{EngineEvent, EngineState, PlaybackEngine};
use crate::library::{MetadataRow, Track};

use super::{DisplaySurface, Intent, PlayerHandle, QueueController};

pub type Outbox = Rc<RefCell<Vec<EngineEvent>>>;

/// Engine double: follows the real state machine and replays queued events on `poll`.
pub struct FakeEngine {
    pub state: EngineState,
    pub position: Duration,
    pub total: Option<Duration>,
    pub volume: f32,
    /// Number of `play` calls seen.
    pub plays: usize,
    /// Behave like a file that cannot be opened: `play` never starts.
    pub broken: bool,
    outbox: Outbox,
}

impl FakeEngine {
    pub fn new(total: Option<Duration>) -> (Self, Outbox) {
        let outbox = Outbox::default();
        let engine = Self {
            state: EngineState::Idle,
            position: Duration::from_secs(42),
            total,
            volume: 1.0,
            plays: 0,
            broken: false,
            outbox: outbox.clone(),
        };
        (engine, outbox)
    }
}

impl PlaybackEngine for FakeEngine {
    fn play(&mut self) {
        self.plays += 1;
        if !self.broken {
            self.state = EngineState::Playing;
        }
    }
    fn pause(&mut self) {
        self.state = EngineState::Paused;
    }
    fn stop(&mut self) {
        self.state = EngineState::Stopped;
        self.position = Duration::ZERO;
    }
    fn seek(&mut self, position: Duration) {
        self.position = position;
    }
    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }
    fn volume(&self) -> f32 {
        self.volume
    }
    fn position(&self) -> Duration {
        self.position
    }
    fn total_duration(&self) -> Option<Duration> {
        self.total
    }
    fn state(&self) -> EngineState {
        self.state
    }
    fn poll(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut *self.outbox.borrow_mut())
    }
}

/// Display double that keeps the latest value of every field.
#[derive(Default)]
pub struct Screen {
    pub label: String,
    pub progress: f64,
    pub rows: Vec<MetadataRow>,
    pub intent: Option<Intent>,
    pub label_updates: usize,
}

impl DisplaySurface for Screen {
    fn show_now_playing(&mut self, label: &str) {
        self.label = label.to_string();
        self.label_updates += 1;
    }
    fn show_progress(&mut self, fraction: f64) {
        self.progress = fraction;
    }
    fn show_metadata(&mut self, rows: Vec<MetadataRow>) {
        self.rows = rows;
    }
    fn show_intent(&mut self, intent: Intent) {
        self.intent = Some(intent);
    }
}

pub type FakeQueue = QueueController<FakeEngine, Screen>;

pub fn track(name: &str) -> Track {
    Track::new(PathBuf::from(format!("/music/{name}.mp3")))
}

/// Build a queue whose engines all report `total`, plus their event outboxes.
pub fn queue_with(
    names: &[&str],
    total: Option<Duration>,
    broken: bool,
) -> (FakeQueue, Vec<Outbox>) {
    let mut outboxes = Vec::new();
    let handles = names
        .iter()
        .map(|name| {
            let (mut engine, outbox) = FakeEngine::new(total);
            engine.broken = broken;
            outboxes.push(outbox);
            PlayerHandle::new(track(name), engine)
        })
        .collect();
    let queue = QueueController::new(handles, Screen::default()).unwrap();
    (queue, outboxes)
}

pub fn queue_with_totals(names: &[&str], total: Option<Duration>) -> (FakeQueue, Vec<Outbox>) {
    queue_with(names, total, false)
}

pub fn queue(names: &[&str]) -> FakeQueue {
    queue_with_totals(names, Some(Duration::from_secs(200))).0
}
