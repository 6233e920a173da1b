//! Built-in stylesheets.
//!
//! Two layers are installed: [`MINIMAL_CSS`] right away so the first frame
//! already has transparent round buttons, and [`full_css`] once the ring is
//! on screen, adding the per-workspace hover glow.  A user `style.css`
//! goes on top of both.
//!
//! # CSS selectors
//!
//! | Selector              | Targets                                   |
//! |-----------------------|-------------------------------------------|
//! | `.workspace-button`   | Every ring button                         |
//! | `.workspace-<n>`      | Button for workspace `n` (1-13)           |
//! | `.workspace-icon`     | Theme image inside a button               |
//! | `.app-icon`           | App icons below the buttons               |
//! | `.tooltip-window`     | The hover preview window                  |

use crate::workspace::Workspace;
use std::fmt::Write;

/// Applied before the window is shown.
pub const MINIMAL_CSS: &str = r#"
window,
window.background {
    background-color: transparent;
    background: none;
}

.workspace-button {
    background: transparent;
    border: none;
    border-radius: 50%;
    color: white;
    font-weight: bold;
    transition: transform 0.1s ease;
}

.workspace-button:hover {
    transform: scale(1.1);
}
"#;

const BASE_CSS: &str = r#"
@keyframes pulse-glow {
    0% {
        box-shadow: inset 0 0 10px currentColor, inset 0 0 20px currentColor,
                    0 0 15px currentColor, 0 0 30px currentColor, 0 0 45px currentColor;
        transform: scale(1.0);
    }
    50% {
        box-shadow: inset 0 0 20px currentColor, inset 0 0 40px currentColor,
                    0 0 25px currentColor, 0 0 50px currentColor, 0 0 75px currentColor;
        transform: scale(1.05);
    }
    100% {
        box-shadow: inset 0 0 10px currentColor, inset 0 0 20px currentColor,
                    0 0 15px currentColor, 0 0 30px currentColor, 0 0 45px currentColor;
        transform: scale(1.0);
    }
}

@keyframes fade-in {
    from { opacity: 0; transform: scale(0.95); }
    to   { opacity: 1; transform: scale(1.0); }
}

.workspace-icon {
    animation: fade-in 0.3s ease-out;
}

.workspace-button {
    background: transparent;
    border: none;
    border-radius: 50%;
    color: white;
    font-weight: bold;
    transition: all 0.1s cubic-bezier(0.25, 0.46, 0.45, 0.94);
    box-shadow: 0 0 0 transparent;
}

.workspace-button:hover {
    background: transparent;
    border: 0px;
    transform: scale(1.1);
}

.workspace-button:active {
    background: rgba(255, 255, 255, 0.2);
    transform: scale(0.95);
    transition: all 0.05s ease;
}

.app-icon {
    background: transparent;
    border-radius: 10px;
    opacity: 0.8;
    transition: all 0.1s cubic-bezier(0.25, 0.46, 0.45, 0.94);
}

.app-icon:hover {
    opacity: 1.0;
    transform: scale(1.1);
    box-shadow: 0 0 10px rgba(255, 255, 255, 0.5);
}

.tooltip-window {
    background: transparent;
    border: 1px solid rgba(255, 255, 255, 0);
    border-radius: 16px;
    color: white;
    font-size: 14px;
    text-shadow: 1px 1px 3px rgba(0, 0, 0, 0.8);
}

window,
window.background {
    background-color: transparent;
    background: none;
}
"#;

type Rgb = (u8, u8, u8);

/// Hover colours of a workspace button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glow {
    /// Text colour and outer halo.
    pub color: Rgb,
    /// Tint of the inner shadow.  Usually the same as `color`.
    pub inset: Rgb,
}

const fn solid(color: Rgb) -> Glow {
    Glow {
        color,
        inset: color,
    }
}

/// Indexed by `number - 1`.
const GLOW: [Glow; 13] = [
    solid((173, 216, 230)),
    solid((0, 100, 255)),
    solid((255, 215, 0)),
    Glow {
        color: (255, 235, 164),
        inset: (255, 255, 224),
    },
    Glow {
        color: (233, 28, 32),
        inset: (203, 28, 32),
    },
    solid((144, 238, 144)),
    solid((255, 182, 193)),
    solid((255, 255, 255)),
    solid((0, 255, 0)),
    solid((135, 206, 235)),
    solid((248, 248, 255)),
    solid((255, 192, 203)),
    solid((255, 20, 147)),
];

/// Hover colours for a workspace button.
pub fn glow(ws: Workspace) -> Glow {
    GLOW[ws.number() as usize - 1]
}

/// The full stylesheet, including one glow rule per workspace.
///
/// The special workspace gets a wider, faster pulse.
pub fn full_css() -> String {
    let mut css = String::from(BASE_CSS);
    for ws in Workspace::all() {
        let Glow {
            color: (r, g, b),
            inset: (ir, ig, ib),
        } = glow(ws);
        let (inner, spread, period) = if ws.is_special() {
            ((20, 40, 0.7, 0.5), (30, 60, 90), 1.2)
        } else {
            ((15, 30, 0.6, 0.4), (20, 40, 60), 1.5)
        };
        let _ = write!(
            css,
            "\n.workspace-{n}:hover {{\n    \
             color: rgb({r}, {g}, {b});\n    \
             box-shadow: inset 0 0 {i0}px rgba({ir}, {ig}, {ib}, {a0}), \
             inset 0 0 {i1}px rgba({ir}, {ig}, {ib}, {a1}),\n                \
             0 0 {s0}px rgb({r}, {g}, {b}), 0 0 {s1}px rgb({r}, {g}, {b}), \
             0 0 {s2}px rgb({r}, {g}, {b});\n    \
             animation: pulse-glow {period}s infinite ease-in-out;\n}}\n",
            n = ws.number(),
            i0 = inner.0,
            i1 = inner.1,
            a0 = inner.2,
            a1 = inner.3,
            s0 = spread.0,
            s1 = spread.1,
            s2 = spread.2,
        );
    }
    css
}
