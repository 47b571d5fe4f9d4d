//! Listener bookkeeping between a handle and the display.
//!
//! A `Subscription` is handed out by `PlayerHandle::attach` and must be given
//! back through `PlayerHandle::detach`. It is deliberately neither `Clone` nor
//! `Copy`, so a detached subscription cannot be used again.

/// The kind of change stream a subscription listens to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StreamKind {
    Position,
    Metadata,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Subscription {
    id: u64,
    handle: usize,
    kind: StreamKind,
}

impl Subscription {
    pub(super) fn new(id: u64, handle: usize, kind: StreamKind) -> Self {
        Self { id, handle, kind }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Index of the handle this subscription is attached to.
    pub fn handle(&self) -> usize {
        self.handle
    }

    pub fn kind(&self) -> StreamKind {
        self.kind
    }
}

/// Live listener slots of one handle, at most one per stream kind.
#[derive(Debug, Default)]
pub(super) struct Listeners {
    position: Option<u64>,
    metadata: Option<u64>,
}

impl Listeners {
    fn slot(&mut self, kind: StreamKind) -> &mut Option<u64> {
        match kind {
            StreamKind::Position => &mut self.position,
            StreamKind::Metadata => &mut self.metadata,
        }
    }

    /// Occupy the slot for `kind`. Returns the id that was displaced, if any.
    pub fn occupy(&mut self, kind: StreamKind, id: u64) -> Option<u64> {
        self.slot(kind).replace(id)
    }

    /// Free the slot for `kind` if it still holds `id`.
    pub fn release(&mut self, kind: StreamKind, id: u64) -> bool {
        let slot = self.slot(kind);
        if *slot == Some(id) {
            *slot = None;
            true
        } else {
            false
        }
    }

    pub fn is_live(&self, kind: StreamKind) -> bool {
        match kind {
            StreamKind::Position => self.position.is_some(),
            StreamKind::Metadata => self.metadata.is_some(),
        }
    }

    pub fn count(&self) -> usize {
        usize::from(self.position.is_some()) + usize::from(self.metadata.is_some())
    }
}
