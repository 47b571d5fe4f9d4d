//! Application module: exposes the display model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the now-playing label,
//! progress, metadata rows and play/pause intent published by the queue.

mod model;

pub use model::*;
