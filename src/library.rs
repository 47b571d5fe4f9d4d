//! Track enumeration and per-file metadata.
//!
//! `scan` turns a directory into the ordered list of tracks the queue is built
//! from; `metadata::probe` reads tags once a track is opened for playback.

pub mod metadata;
mod model;
mod scan;
mod uri;

pub use model::*;
pub use scan::scan;
