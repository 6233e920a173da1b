//! Application configuration.
//!
//! The configuration is loaded from `$XDG_CONFIG_HOME/hyprring/config.json`
//! (or a path given with `--config`).  Every section is optional and falls
//! back to the compiled-in defaults, so a missing file and `{}` behave the
//! same.
//!
//! # Example
//!
//! ```json
//! {
//!   "transport": "hyprctl",
//!   "special": { "name": "scratch", "label": "Scratchpad" },
//!   "theme": {
//!     "marker": "~/.config/hypr/Light.txt",
//!     "icon_root": "~/.config/Elysia/assets/workspace",
//!     "variants": [{ "keyword": "cyrene", "subdir": "AMPH" }]
//!   },
//!   "preview_dir": "/tmp/workspace_previews",
//!   "overlay": { "fade_in_ms": 70, "max_app_icons": 4 }
//! }
//! ```
//!
//! Paths starting with `~/` are resolved against `$HOME`.

use crate::hyprland::Transport;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// How to reach Hyprland.
    #[serde(default)]
    pub transport: Transport,

    /// The special workspace in the centre of the ring.
    #[serde(default)]
    pub special: SpecialConfig,

    /// Where workspace icons come from.
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Directory holding `workspace_<n>.png` screenshots.
    #[serde(default = "default_preview_dir", deserialize_with = "expand_path")]
    pub preview_dir: PathBuf,

    /// Overlay timing and density settings.
    #[serde(default)]
    pub overlay: OverlayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transport: Transport::default(),
            special: SpecialConfig::default(),
            theme: ThemeConfig::default(),
            preview_dir: default_preview_dir(),
            overlay: OverlayConfig::default(),
        }
    }
}

/// The special (scratchpad) workspace shown as button 13.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialConfig {
    /// Hyprland name without the `special:` prefix.
    pub name: String,
    /// Heading shown in the hover preview.
    pub label: String,
}

impl Default for SpecialConfig {
    fn default() -> Self {
        Self {
            name: "elysia".into(),
            label: "Special Workspace (Elysia)".into(),
        }
    }
}

/// Workspace icon theme selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// File whose contents name the active theme.
    #[serde(deserialize_with = "expand_path")]
    pub marker: PathBuf,
    /// Icon directory of the default theme.
    #[serde(deserialize_with = "expand_path")]
    pub icon_root: PathBuf,
    /// Alternative themes, checked in order.
    pub variants: Vec<ThemeVariant>,
}

/// A theme keyword and the icon subdirectory it selects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeVariant {
    pub keyword: String,
    pub subdir: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            marker: expand_home(Path::new("~/.config/hypr/Light.txt")),
            icon_root: expand_home(Path::new("~/.config/Elysia/assets/workspace")),
            variants: vec![ThemeVariant {
                keyword: "cyrene".into(),
                subdir: "AMPH".into(),
            }],
        }
    }
}

/// Overlay timing and density settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Duration of the opening fade (ms).  Hover previews are held back
    /// until it finishes.  `0` shows the ring instantly.
    pub fade_in_ms: u64,
    /// Most app icons drawn under one button.
    pub max_app_icons: usize,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            fade_in_ms: 70,
            max_app_icons: 4,
        }
    }
}

fn default_preview_dir() -> PathBuf {
    PathBuf::from("/tmp/workspace_previews")
}

fn expand_path<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = PathBuf::deserialize(deserializer)?;
    Ok(expand_home(&raw))
}

/// Replace a leading `~` with `$HOME`.
///
/// Paths without a tilde, and tildes when `$HOME` is unset, are returned
/// unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(rest),
        None => path.to_path_buf(),
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
