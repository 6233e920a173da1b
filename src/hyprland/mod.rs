//! Hyprland-specific implementations.
//!
//! This module provides the concrete [`Compositor`](crate::traits::Compositor)
//! backend, talking to Hyprland either over its IPC socket or through the
//! `hyprctl` command-line tool.
//!
//! Nothing outside this module should reference Hyprland directly.

pub mod wm;

use serde::{Deserialize, Serialize};

/// How requests reach Hyprland.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Write directly to `$XDG_RUNTIME_DIR/hypr/<instance>/.socket.sock`.
    #[default]
    Socket,
    /// Spawn `hyprctl` for every request.
    Hyprctl,
}
