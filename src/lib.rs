//! **hyprring** — a radial workspace switcher overlay.
//!
//! Twelve workspace buttons sit on a circle around an enlarged centre button
//! for the special workspace (13).  Picking one, by click or by key, tells
//! the compositor to switch and exits.  Hovering a button shows the apps
//! running on that workspace together with a previously captured screenshot.
//!
//! # Architecture
//!
//! * [`traits::Compositor`] abstracts workspace queries and dispatches so
//!   the switching logic is not coupled to a specific compositor.
//! * [`switcher::WorkspaceSwitcher`] turns user [`workspace::Action`]s into
//!   compositor calls and builds hover [`preview::Preview`]s.
//! * [`layout`], [`cache`], [`icons`] and [`theme`] are toolkit-free
//!   helpers used by the GTK front-end in [`overlay`].
//!
//! The Hyprland backend lives in [`hyprland`].

pub mod cache;
pub mod cli;
pub mod config;
pub mod hyprland;
pub mod icons;
pub mod layout;
pub mod overlay;
pub mod preview;
pub mod style;
pub mod switcher;
pub mod theme;
pub mod traits;
pub mod workspace;
