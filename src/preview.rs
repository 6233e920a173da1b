//! Hover preview content.
//!
//! A screenshot tool outside this crate drops one PNG per workspace into
//! the preview directory.  When the user hovers a button the overlay shows
//! that screenshot (if the workspace has windows) above a list of the
//! window titles.

use crate::workspace::Workspace;
use std::path::{Path, PathBuf};

/// Screenshot file for a workspace.
pub fn screenshot_path(dir: &Path, ws: Workspace) -> PathBuf {
    dir.join(format!("workspace_{}.png", ws.number()))
}

/// Everything the tooltip shows for one workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub workspace: Workspace,
    /// `Workspace N`, or the special workspace's label.
    pub heading: String,
    /// Window titles, in compositor order.
    pub apps: Vec<String>,
    /// Screenshot to show.  Only set when the workspace has windows and the
    /// file exists, so an empty workspace never shows a stale image.
    pub thumbnail: Option<PathBuf>,
}

impl Preview {
    /// Assemble a preview, checking for the screenshot on disk.
    pub fn new(ws: Workspace, special_label: &str, apps: Vec<String>, preview_dir: &Path) -> Self {
        let heading = if ws.is_special() {
            special_label.to_string()
        } else {
            format!("Workspace {}", ws.number())
        };
        let thumbnail = if apps.is_empty() {
            None
        } else {
            Some(screenshot_path(preview_dir, ws)).filter(|p| p.exists())
        };
        Self {
            workspace: ws,
            heading,
            apps,
            thumbnail,
        }
    }

    /// Label text: heading plus a bulleted title list, or `Nothing`.
    pub fn text(&self) -> String {
        let mut text = self.heading.clone();
        if self.apps.is_empty() {
            text.push_str("\nNothing");
        } else {
            text.push_str(&format!(" ({} apps):", self.apps.len()));
            for app in &self.apps {
                text.push_str("\n• ");
                text.push_str(app);
            }
        }
        text
    }
}
