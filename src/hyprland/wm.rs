//! [`Compositor`] implementation backed by Hyprland.
//!
//! With [`Transport::Socket`] requests go straight to Hyprland's command
//! socket at `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`.
//! With [`Transport::Hyprctl`] the same requests are issued through the
//! `hyprctl` binary.  Either way the JSON replies are decoded into the
//! handful of fields hyprring needs.

use super::Transport;
use crate::traits::{ClientInfo, Compositor, MonitorInfo, WorkspaceRef};
use log::debug;
use serde::Deserialize;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;
use std::process::Command;

/// Hyprland-backed compositor.
///
/// No connection is held open; every call is a short-lived request.
pub struct HyprlandWm {
    transport: Transport,
}

/// Errors that can occur when talking to Hyprland.
#[derive(Debug, thiserror::Error)]
#[error("hyprland IPC error: {0}")]
pub struct HyprlandWmError(String);

impl Default for HyprlandWm {
    fn default() -> Self {
        Self::new(Transport::default())
    }
}

/// A single request to Hyprland.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Request<'a> {
    /// JSON data query such as `clients`.
    Json(&'a str),
    /// Dispatcher with its arguments, e.g. `workspace 3`.
    Dispatch(&'a str),
}

impl Request<'_> {
    /// Wire form for the command socket.
    fn socket_message(&self) -> String {
        match self {
            Request::Json(query) => format!("j/{}", query),
            Request::Dispatch(args) => format!("/dispatch {}", args),
        }
    }

    /// Argument vector for `hyprctl`.
    fn hyprctl_args(&self) -> Vec<&str> {
        match self {
            Request::Json(query) => vec!["-j", *query],
            Request::Dispatch(args) => {
                let mut v = vec!["dispatch"];
                v.extend(args.split_whitespace());
                v
            }
        }
    }
}

impl HyprlandWm {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    fn request(&self, req: Request<'_>) -> Result<String, HyprlandWmError> {
        debug!("hyprland {:?} via {:?}", req, self.transport);
        match self.transport {
            Transport::Socket => socket_request(&req.socket_message()),
            Transport::Hyprctl => hyprctl_request(&req.hyprctl_args()),
        }
    }

    fn dispatch(&self, args: &str) -> Result<(), HyprlandWmError> {
        let reply = self.request(Request::Dispatch(args))?;
        check_dispatch(&reply)
    }
}

//  Transports

/// Resolve the Hyprland command socket path.
fn socket_path() -> Result<PathBuf, HyprlandWmError> {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR")
        .map_err(|_| HyprlandWmError("XDG_RUNTIME_DIR not set".into()))?;
    let his = std::env::var("HYPRLAND_INSTANCE_SIGNATURE")
        .map_err(|_| HyprlandWmError("HYPRLAND_INSTANCE_SIGNATURE not set".into()))?;
    Ok(PathBuf::from(format!(
        "{}/hypr/{}/.socket.sock",
        runtime_dir, his
    )))
}

fn socket_request(message: &str) -> Result<String, HyprlandWmError> {
    let path = socket_path()?;
    let mut stream = UnixStream::connect(&path)
        .map_err(|e| HyprlandWmError(format!("connect to {}: {}", path.display(), e)))?;

    stream
        .write_all(message.as_bytes())
        .map_err(|e| HyprlandWmError(format!("write: {}", e)))?;

    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .map_err(|e| HyprlandWmError(format!("read: {}", e)))?;

    String::from_utf8(response).map_err(|e| HyprlandWmError(format!("utf-8: {}", e)))
}

fn hyprctl_request(args: &[&str]) -> Result<String, HyprlandWmError> {
    let output = Command::new("hyprctl")
        .args(args)
        .output()
        .map_err(|e| HyprlandWmError(format!("spawn hyprctl: {}", e)))?;
    if !output.status.success() {
        return Err(HyprlandWmError(format!(
            "hyprctl {} exited with {}: {}",
            args.join(" "),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    String::from_utf8(output.stdout).map_err(|e| HyprlandWmError(format!("utf-8: {}", e)))
}

//  Replies

/// Subset of the JSON object returned by `activewindow`.
#[derive(Deserialize)]
struct ActiveWindowJson {
    workspace: WorkspaceRef,
}

fn check_dispatch(reply: &str) -> Result<(), HyprlandWmError> {
    if reply.trim() == "ok" {
        Ok(())
    } else {
        Err(HyprlandWmError(format!("dispatch error: {}", reply.trim())))
    }
}

fn parse<'a, T: Deserialize<'a>>(json: &'a str) -> Result<T, HyprlandWmError> {
    serde_json::from_str(json).map_err(|e| HyprlandWmError(format!("parse: {}", e)))
}

fn parse_active_workspace(json: &str) -> Result<Option<WorkspaceRef>, HyprlandWmError> {
    // Hyprland returns an empty object `{}` when no window is focused.
    if json.trim() == "{}" || json.trim().is_empty() {
        return Ok(None);
    }
    let w: ActiveWindowJson = parse(json)?;
    Ok(Some(w.workspace))
}

//  Compositor implementation

impl Compositor for HyprlandWm {
    type Error = HyprlandWmError;

    fn clients(&self) -> Result<Vec<ClientInfo>, Self::Error> {
        let json = self.request(Request::Json("clients"))?;
        parse(&json)
    }

    fn active_workspace(&self) -> Result<Option<WorkspaceRef>, Self::Error> {
        let json = self.request(Request::Json("activewindow"))?;
        parse_active_workspace(&json)
    }

    fn monitors(&self) -> Result<Vec<MonitorInfo>, Self::Error> {
        let json = self.request(Request::Json("monitors"))?;
        parse(&json)
    }

    fn switch_workspace(&self, id: u8) -> Result<(), Self::Error> {
        self.dispatch(&format!("workspace {}", id))
    }

    fn toggle_special(&self, name: &str) -> Result<(), Self::Error> {
        self.dispatch(&format!("togglespecialworkspace {}", name))
    }
}
