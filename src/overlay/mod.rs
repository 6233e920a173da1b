//! Front-ends for the workspace ring.
//!
//! When the `overlay-gtk` feature is enabled, [`gtk::run`] takes over the
//! main thread, shows the ring and returns once the user picked a workspace
//! or cancelled.

#[cfg(feature = "overlay-gtk")]
pub mod gtk;
