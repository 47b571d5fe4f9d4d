//! The playback queue: a fixed, circular list of per-track handles.
//!
//! `QueueController` decides which handle is active, forwards user commands to
//! its engine and keeps the display in step through explicit subscriptions.

mod controller;
mod display;
mod handle;
mod subscription;

pub use controller::QueueController;
pub use display::{DisplaySurface, Intent};
pub use handle::PlayerHandle;

#[cfg(test)]
pub(crate) mod testing;
#[cfg(test)]
mod tests;
