//! App icon name resolution.
//!
//! Hyprland reports each client's window class (`firefox`, `Alacritty`,
//! `org.gnome.Nautilus`, …).  Most classes double as icon names in the
//! user's icon theme, sometimes only in lowercase.  When neither works a
//! short chain of generic icons keeps the slot from staying empty.

/// Generic icons tried, in order, when a class has no icon of its own.
pub const FALLBACK_ICONS: &[&str] = &[
    "application-x-executable",
    "application-default-icon",
    "application",
    "window",
    "folder",
];

/// Pick the icon name to load for a window class.
///
/// `has_icon` asks the icon theme whether a name exists.  Returns `None`
/// for an empty class or when not even a fallback is installed.
pub fn resolve_icon_name<F>(class: &str, has_icon: F) -> Option<String>
where
    F: Fn(&str) -> bool,
{
    if class.is_empty() {
        return None;
    }
    if has_icon(class) {
        return Some(class.to_string());
    }
    let lower = class.to_lowercase();
    if lower != class && has_icon(&lower) {
        return Some(lower);
    }
    FALLBACK_ICONS
        .iter()
        .find(|name| has_icon(name))
        .map(|name| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme(names: &'static [&'static str]) -> impl Fn(&str) -> bool {
        move |n: &str| names.contains(&n)
    }

    #[test]
    fn exact_class_wins() {
        let has = theme(&["Alacritty", "alacritty", "folder"]);
        assert_eq!(resolve_icon_name("Alacritty", has).as_deref(), Some("Alacritty"));
    }

    #[test]
    fn lowercase_retry() {
        let has = theme(&["alacritty"]);
        assert_eq!(resolve_icon_name("Alacritty", has).as_deref(), Some("alacritty"));
    }

    #[test]
    fn falls_back_in_order() {
        let has = theme(&["folder", "window"]);
        assert_eq!(resolve_icon_name("obscure-app", has).as_deref(), Some("window"));
        let has = theme(&["application-x-executable", "folder"]);
        assert_eq!(
            resolve_icon_name("obscure-app", has).as_deref(),
            Some("application-x-executable")
        );
    }

    #[test]
    fn nothing_installed() {
        assert_eq!(resolve_icon_name("obscure-app", theme(&[])), None);
    }

    #[test]
    fn empty_class() {
        assert_eq!(resolve_icon_name("", theme(&["folder"])), None);
    }
}
