//! Workspaces and user actions.
//!
//! This module defines the vocabulary shared by every component:
//! [`Workspace`] names one of the thirteen buttons on the ring, and
//! [`Action`] describes what the user asked for.

use std::fmt;

/// Number of regular workspaces arranged on the ring.
pub const RING_SIZE: u8 = 12;

/// A workspace button, numbered `1..=13`.
///
/// `1..=12` are regular workspaces placed on the ring; `13` is the special
/// (scratchpad) workspace shown in the centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Workspace(u8);

impl Workspace {
    /// The special workspace in the centre of the ring.
    pub const SPECIAL: Workspace = Workspace(RING_SIZE + 1);

    /// Validate a workspace number.
    pub fn new(n: u8) -> Option<Self> {
        (1..=Self::SPECIAL.0).contains(&n).then_some(Self(n))
    }

    /// The workspace number.
    pub fn number(self) -> u8 {
        self.0
    }

    /// Whether this is the special centre workspace.
    pub fn is_special(self) -> bool {
        self == Self::SPECIAL
    }

    /// Every workspace in button order, `1..=13`.
    pub fn all() -> impl Iterator<Item = Workspace> {
        (1..=Self::SPECIAL.0).map(Workspace)
    }

    /// The twelve ring workspaces, `1..=12`.
    pub fn regular() -> impl Iterator<Item = Workspace> {
        (1..=RING_SIZE).map(Workspace)
    }
}

impl fmt::Display for Workspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Workspace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u8 = s
            .trim()
            .parse()
            .map_err(|_| format!("not a workspace number: {:?}", s))?;
        Workspace::new(n).ok_or_else(|| format!("workspace out of range (1-13): {}", n))
    }
}

/// What the user asked the overlay to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Switch to (or, for the special workspace, toggle) a workspace.
    Switch(Workspace),
    /// Close the overlay without touching the compositor.
    Cancel,
}

/// Map a toolkit key name to an [`Action`].
///
/// Names follow the GDK keysym spelling (`"1"`, `"minus"`, `"BackSpace"`,
/// …).  The number row selects workspaces 1-12 left to right (`0` is 10,
/// `-` is 11, `=` is 12), Backspace selects the special workspace and
/// Escape cancels.  Unmapped keys return `None` so the toolkit can keep
/// propagating them.
pub fn action_for_key(name: &str) -> Option<Action> {
    let n = match name {
        "Escape" => return Some(Action::Cancel),
        "BackSpace" => Workspace::SPECIAL.number(),
        "0" => 10,
        "minus" => 11,
        "equal" => 12,
        digit => match digit.as_bytes() {
            [d @ b'1'..=b'9'] => d - b'0',
            _ => return None,
        },
    };
    Workspace::new(n).map(Action::Switch)
}
