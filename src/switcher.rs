//! The orchestrator between the overlay and the compositor.
//!
//! [`WorkspaceSwitcher`] reacts to user [`Action`]s by issuing calls to the
//! [`Compositor`] trait and answers the overlay's questions about what runs
//! on each workspace.  Queries are best effort: a failed query is logged
//! and treated as "no windows" so the ring keeps working.

use crate::config::Config;
use crate::layout::{choose_output, Output};
use crate::preview::Preview;
use crate::traits::{ClientInfo, Compositor, MonitorInfo};
use crate::workspace::{Action, Workspace};
use log::{debug, info, warn};
use std::path::PathBuf;

/// Possible errors from the switcher.
#[derive(Debug, thiserror::Error)]
pub enum SwitcherError {
    /// The compositor returned an error.
    #[error("compositor error: {0}")]
    Compositor(String),
}

/// Turns workspace picks into compositor dispatches.
///
/// The switcher is generic over any [`Compositor`] implementation, making it
/// independent of Hyprland or any other concrete backend.
///
/// # Typical usage
///
/// ```ignore
/// let wm = HyprlandWm::new(Transport::Socket);
/// let switcher = WorkspaceSwitcher::new(wm, &Config::default());
/// switcher.handle(Action::Switch(Workspace::SPECIAL))?;
/// ```
pub struct WorkspaceSwitcher<C: Compositor> {
    compositor: C,
    special_name: String,
    special_label: String,
    preview_dir: PathBuf,
}

impl<C: Compositor> WorkspaceSwitcher<C> {
    pub fn new(compositor: C, config: &Config) -> Self {
        Self {
            compositor,
            special_name: config.special.name.clone(),
            special_label: config.special.label.clone(),
            preview_dir: config.preview_dir.clone(),
        }
    }

    /// Process a single [`Action`].
    ///
    /// [`Action::Cancel`] never touches the compositor.
    pub fn handle(&self, action: Action) -> Result<(), SwitcherError> {
        match action {
            Action::Switch(ws) => self.switch_to(ws),
            Action::Cancel => {
                info!("cancelled");
                Ok(())
            }
        }
    }

    /// Show workspace `ws`.
    ///
    /// The special workspace is toggled.  A regular workspace picked while
    /// the special workspace is focused first toggles the special workspace
    /// away, then switches, so the pick is not hidden behind it.
    pub fn switch_to(&self, ws: Workspace) -> Result<(), SwitcherError> {
        if ws.is_special() {
            info!("toggle special workspace {}", self.special_name);
            return self
                .compositor
                .toggle_special(&self.special_name)
                .map_err(|e| SwitcherError::Compositor(e.to_string()));
        }

        if self.is_on_special() {
            info!("leave special workspace {} and switch to {}", self.special_name, ws);
            self.compositor
                .toggle_special(&self.special_name)
                .map_err(|e| SwitcherError::Compositor(e.to_string()))?;
        } else {
            info!("switch to workspace {}", ws);
        }
        self.compositor
            .switch_workspace(ws.number())
            .map_err(|e| SwitcherError::Compositor(e.to_string()))
    }

    /// Whether the focused window sits on a special workspace.
    ///
    /// The focused window is a better signal than the active workspace,
    /// which may report the overlay's own workspace.  No focused window, or
    /// a failed query, counts as "not special".
    pub fn is_on_special(&self) -> bool {
        match self.compositor.active_workspace() {
            Ok(Some(ws)) => {
                debug!("focused window on workspace {} ({:?})", ws.id, ws.name);
                ws.is_special()
            }
            Ok(None) => false,
            Err(e) => {
                warn!("active window query failed: {}", e);
                false
            }
        }
    }

    /// Windows on `ws`, in compositor order.
    pub fn clients_on(&self, ws: Workspace) -> Vec<ClientInfo> {
        let clients = match self.compositor.clients() {
            Ok(c) => c,
            Err(e) => {
                warn!("client query failed: {}", e);
                return Vec::new();
            }
        };
        let special = format!("special:{}", self.special_name);
        clients
            .into_iter()
            .filter(|c| {
                if ws.is_special() {
                    c.workspace.name == special
                } else {
                    c.workspace.id == ws.number() as i64
                }
            })
            .collect()
    }

    /// Window classes on `ws`, skipping windows without one.
    pub fn app_classes(&self, ws: Workspace) -> Vec<String> {
        self.clients_on(ws)
            .into_iter()
            .map(|c| c.class)
            .filter(|c| !c.is_empty())
            .collect()
    }

    /// Window titles on `ws`, skipping untitled windows.
    pub fn app_titles(&self, ws: Workspace) -> Vec<String> {
        self.clients_on(ws)
            .into_iter()
            .map(|c| c.title)
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Hover preview for `ws`.
    pub fn preview(&self, ws: Workspace) -> Preview {
        Preview::new(ws, &self.special_label, self.app_titles(ws), &self.preview_dir)
    }

    /// The monitor Hyprland has focused, if it can be determined.
    pub fn focused_monitor(&self) -> Option<MonitorInfo> {
        match self.compositor.monitors() {
            Ok(monitors) => monitors.into_iter().find(|m| m.focused),
            Err(e) => {
                warn!("monitor query failed: {}", e);
                None
            }
        }
    }

    /// The toolkit output to show the ring on and the size to lay it out
    /// for, following the compositor's focus.
    pub fn pick_output(&self, outputs: &[Output<'_>]) -> (Option<usize>, (i32, i32)) {
        choose_output(outputs, self.focused_monitor().as_ref())
    }
}
