//! Audio subsystem: the per-track engine seam and its `rodio` implementation.
//!
//! Submodules:
//! - `types`: engine state, events, errors and the `PlaybackEngine` trait
//! - `sink`: helpers that open/decode a file into a paused `rodio::Sink`
//! - `engine`: `RodioEngine`, one instance per queued track

mod engine;
mod sink;
mod types;

pub use engine::RodioEngine;
pub use types::*;
