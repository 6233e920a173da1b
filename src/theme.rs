//! Workspace icon theme selection.
//!
//! The desktop keeps a small marker file whose contents name the active
//! theme.  Each theme ships its own set of workspace icons
//! (`<dir>/<n>.png`); the marker decides which directory is used.

use crate::config::ThemeConfig;
use crate::workspace::Workspace;
use log::debug;
use std::path::{Path, PathBuf};

/// Directory that holds the workspace icons for the active theme.
///
/// The marker file's lines are joined and searched for each variant keyword
/// in turn; the first match selects `<icon_root>/<subdir>`.  A missing or
/// unreadable marker, or one that matches nothing, selects `icon_root`.
pub fn workspace_icon_dir(theme: &ThemeConfig) -> PathBuf {
    let content = match std::fs::read(&theme.marker) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).lines().collect::<String>(),
        Err(e) => {
            debug!("theme marker {}: {}", theme.marker.display(), e);
            return theme.icon_root.clone();
        }
    };

    match theme
        .variants
        .iter()
        .find(|v| !v.keyword.is_empty() && content.contains(&v.keyword))
    {
        Some(v) => {
            debug!("theme marker selects variant {:?}", v.keyword);
            theme.icon_root.join(&v.subdir)
        }
        None => theme.icon_root.clone(),
    }
}

/// Icon file for a workspace inside the theme directory.
pub fn workspace_icon_path(dir: &Path, ws: Workspace) -> PathBuf {
    dir.join(format!("{}.png", ws.number()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeVariant;

    fn tmp_marker(name: &str, content: Option<&str>) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "hyprring-test-{}-{}.txt",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        if let Some(c) = content {
            std::fs::write(&path, c).unwrap();
        }
        path
    }

    fn theme(marker: PathBuf) -> ThemeConfig {
        ThemeConfig {
            marker,
            icon_root: PathBuf::from("/icons/workspace"),
            variants: vec![ThemeVariant {
                keyword: "cyrene".into(),
                subdir: "AMPH".into(),
            }],
        }
    }

    #[test]
    fn missing_marker_uses_root() {
        let t = theme(tmp_marker("missing", None));
        assert_eq!(workspace_icon_dir(&t), PathBuf::from("/icons/workspace"));
    }

    #[test]
    fn keyword_selects_variant() {
        let marker = tmp_marker("cyrene", Some("theme=\ncyrene\n"));
        let t = theme(marker.clone());
        assert_eq!(workspace_icon_dir(&t), PathBuf::from("/icons/workspace/AMPH"));
        let _ = std::fs::remove_file(marker);
    }

    #[test]
    fn other_content_uses_root() {
        let marker = tmp_marker("ely", Some("ely"));
        let t = theme(marker.clone());
        assert_eq!(workspace_icon_dir(&t), PathBuf::from("/icons/workspace"));
        let _ = std::fs::remove_file(marker);
    }

    #[test]
    fn keyword_split_across_lines_still_matches() {
        let marker = tmp_marker("split", Some("cyr\nene"));
        let t = theme(marker.clone());
        assert_eq!(workspace_icon_dir(&t), PathBuf::from("/icons/workspace/AMPH"));
        let _ = std::fs::remove_file(marker);
    }

    #[test]
    fn stray_bytes_do_not_hide_keyword() {
        let marker = tmp_marker("bytes", None);
        std::fs::write(&marker, b"\xff\xfe cyrene \x80").unwrap();
        let t = theme(marker.clone());
        assert_eq!(workspace_icon_dir(&t), PathBuf::from("/icons/workspace/AMPH"));
        let _ = std::fs::remove_file(marker);
    }

    #[test]
    fn icon_file_name() {
        let dir = Path::new("/icons");
        assert_eq!(
            workspace_icon_path(dir, Workspace::SPECIAL),
            PathBuf::from("/icons/13.png")
        );
    }
}
