use tracing::warn;

use crate::audio::PlaybackEngine;
use crate::library::{Metadata, Track};

use super::subscription::{Listeners, StreamKind, Subscription};

/// One queued track together with its own engine instance.
///
/// The handle keeps the track's metadata as it becomes known and the listener
/// slots the controller attaches while the handle is active.
pub struct PlayerHandle<E> {
    track: Track,
    engine: E,
    metadata: Metadata,
    listeners: Listeners,
}

impl<E: PlaybackEngine> PlayerHandle<E> {
    pub fn new(track: Track, engine: E) -> Self {
        Self {
            track,
            engine,
            metadata: Metadata::new(),
            listeners: Listeners::default(),
        }
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub(super) fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub(super) fn set_metadata(&mut self, metadata: Metadata) {
        self.metadata = metadata;
    }

    /// Start listening to `kind` on this handle, which sits at `index` in the queue.
    pub(super) fn attach(&mut self, index: usize, kind: StreamKind, id: u64) -> Subscription {
        if let Some(stale) = self.listeners.occupy(kind, id) {
            warn!(
                track = %self.track.label(),
                ?kind,
                stale,
                "attached over a live subscription"
            );
        }
        Subscription::new(id, index, kind)
    }

    /// Stop listening. Consumes the subscription.
    pub(super) fn detach(&mut self, subscription: Subscription) {
        self.listeners
            .release(subscription.kind(), subscription.id());
    }

    /// Whether changes of `kind` on this handle currently reach the display.
    pub fn is_subscribed(&self, kind: StreamKind) -> bool {
        self.listeners.is_live(kind)
    }

    /// Number of live subscriptions on this handle.
    pub fn live_subscriptions(&self) -> usize {
        self.listeners.count()
    }
}
