use crate::audio::{EngineState, PlaybackEngine};
use crate::mpris::{MprisHandle, PlaybackStatus};
use crate::queue::{DisplaySurface, Intent, QueueController};

/// What MPRIS last saw; republish only when it changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MprisSnapshot {
    pub index: usize,
    pub status: PlaybackStatus,
    pub volume: f32,
}

pub fn snapshot<E: PlaybackEngine, D: DisplaySurface>(
    controller: &QueueController<E, D>,
) -> MprisSnapshot {
    let status = if controller.active().engine().state() == EngineState::Stopped {
        PlaybackStatus::Stopped
    } else {
        match controller.intent() {
            Intent::Playing => PlaybackStatus::Playing,
            Intent::Paused => PlaybackStatus::Paused,
        }
    };

    MprisSnapshot {
        index: controller.active_index(),
        status,
        volume: controller.volume(),
    }
}

pub fn update_mpris<E: PlaybackEngine, D: DisplaySurface>(
    mpris: &MprisHandle,
    controller: &QueueController<E, D>,
) -> MprisSnapshot {
    let snap = snapshot(controller);
    let track = controller.active().track();
    mpris.set_track(Some(track.label()), Some(track.uri.clone()));
    mpris.set_status(snap.status);
    mpris.set_volume(f64::from(snap.volume));
    snap
}
