//! The compositor abstraction.
//!
//! Everything hyprring needs from the window manager fits in the
//! [`Compositor`] trait: list the windows, find the focused one, and switch
//! workspaces.  The [`WorkspaceSwitcher`](crate::switcher::WorkspaceSwitcher)
//! only depends on this trait, which keeps it testable without a running
//! compositor.

use serde::Deserialize;

/// The workspace a window lives on, as the compositor reports it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkspaceRef {
    /// Numeric id.  Hyprland gives special workspaces negative ids.
    pub id: i64,
    /// Name, e.g. `"3"` or `"special:scratch"`.
    pub name: String,
}

impl WorkspaceRef {
    /// Whether this is a special (scratchpad) workspace.
    pub fn is_special(&self) -> bool {
        self.id < 0 || self.name.starts_with("special:")
    }
}

/// A mapped window.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientInfo {
    /// Window title.
    pub title: String,
    /// Window class, usually the app id.
    pub class: String,
    pub workspace: WorkspaceRef,
}

/// A monitor known to the compositor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonitorInfo {
    /// Connector name (e.g. `"DP-1"`).
    pub name: String,
    /// Horizontal resolution in physical pixels.
    pub width: u32,
    /// Vertical resolution in physical pixels.
    pub height: u32,
    /// Output scale factor.
    #[serde(default = "unit_scale")]
    pub scale: f64,
    /// Whether the monitor has keyboard focus.
    #[serde(default)]
    pub focused: bool,
}

fn unit_scale() -> f64 {
    1.0
}

impl MonitorInfo {
    /// Size in logical (scaled) pixels.
    pub fn logical_size(&self) -> (i32, i32) {
        let scale = if self.scale > 0.0 { self.scale } else { 1.0 };
        (
            (self.width as f64 / scale).round() as i32,
            (self.height as f64 / scale).round() as i32,
        )
    }
}

/// Abstraction over a compositor's control interface.
///
/// An implementation might talk to Hyprland over its IPC socket, shell out
/// to `hyprctl`, or record calls for a test.
pub trait Compositor {
    /// The error type produced by this compositor.
    type Error: std::error::Error + Send + 'static;

    /// Every mapped window.
    fn clients(&self) -> Result<Vec<ClientInfo>, Self::Error>;

    /// Workspace of the focused window, or `None` when nothing is focused.
    fn active_workspace(&self) -> Result<Option<WorkspaceRef>, Self::Error>;

    /// Every monitor.
    fn monitors(&self) -> Result<Vec<MonitorInfo>, Self::Error>;

    /// Show regular workspace `id` on the focused monitor.
    fn switch_workspace(&self, id: u8) -> Result<(), Self::Error>;

    /// Show or hide the special workspace `name` (without `special:`).
    fn toggle_special(&self, name: &str) -> Result<(), Self::Error>;
}

#[cfg(test)]
pub(crate) mod mock {
    //! A recording [`Compositor`] shared by the unit tests.

    use super::*;
    use std::cell::RefCell;

    /// A dispatch the mock received.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Dispatch {
        Workspace(u8),
        ToggleSpecial(String),
    }

    #[derive(Debug, thiserror::Error)]
    #[error("mock compositor failure")]
    pub struct MockError;

    #[derive(Debug, Default)]
    pub struct MockCompositor {
        pub clients: Vec<ClientInfo>,
        pub active: Option<WorkspaceRef>,
        pub monitors: Vec<MonitorInfo>,
        /// Fail every query.
        pub broken_queries: bool,
        /// Fail every dispatch.
        pub broken_dispatch: bool,
        pub log: RefCell<Vec<Dispatch>>,
    }

    pub fn client(title: &str, class: &str, id: i64, name: &str) -> ClientInfo {
        ClientInfo {
            title: title.into(),
            class: class.into(),
            workspace: WorkspaceRef {
                id,
                name: name.into(),
            },
        }
    }

    impl Compositor for MockCompositor {
        type Error = MockError;

        fn clients(&self) -> Result<Vec<ClientInfo>, MockError> {
            if self.broken_queries {
                return Err(MockError);
            }
            Ok(self.clients.clone())
        }

        fn active_workspace(&self) -> Result<Option<WorkspaceRef>, MockError> {
            if self.broken_queries {
                return Err(MockError);
            }
            Ok(self.active.clone())
        }

        fn monitors(&self) -> Result<Vec<MonitorInfo>, MockError> {
            if self.broken_queries {
                return Err(MockError);
            }
            Ok(self.monitors.clone())
        }

        fn switch_workspace(&self, id: u8) -> Result<(), MockError> {
            if self.broken_dispatch {
                return Err(MockError);
            }
            self.log.borrow_mut().push(Dispatch::Workspace(id));
            Ok(())
        }

        fn toggle_special(&self, name: &str) -> Result<(), MockError> {
            if self.broken_dispatch {
                return Err(MockError);
            }
            self.log
                .borrow_mut()
                .push(Dispatch::ToggleSpecial(name.to_string()));
            Ok(())
        }
    }
}
