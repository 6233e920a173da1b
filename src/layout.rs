//! Ring geometry.
//!
//! [`Layout`] derives every on-screen size and position from the screen
//! dimensions: twelve buttons on a circle (workspace 1 at twelve o'clock,
//! clockwise), the double-size special button in the centre, the row of app
//! icons under each button, and where the hover tooltip goes.
//!
//! All coordinates are logical pixels relative to the top-left corner of the
//! full-screen overlay.  Floating-point results are truncated toward zero.

use crate::traits::MonitorInfo;
use crate::workspace::{Workspace, RING_SIZE};
use log::warn;
use std::f64::consts::PI;

/// Distance kept between the tooltip and the screen edges.
const EDGE_PADDING: i32 = 10;

/// Screen size assumed when no monitor can be queried.
pub const FALLBACK_SCREEN: (i32, i32) = (1920, 1080);

/// A display output as the toolkit sees it, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Output<'a> {
    pub connector: Option<&'a str>,
    pub width: i32,
    pub height: i32,
}

/// Pick the output the ring covers and the screen size to lay it out for.
///
/// The output whose connector matches the compositor's focused monitor
/// wins, then the first output.  With no outputs at all the focused
/// monitor's logical size is used, then [`FALLBACK_SCREEN`].
pub fn choose_output(
    outputs: &[Output<'_>],
    focused: Option<&MonitorInfo>,
) -> (Option<usize>, (i32, i32)) {
    let matched = focused.and_then(|f| {
        outputs
            .iter()
            .position(|o| o.connector == Some(f.name.as_str()))
    });
    match matched.or((!outputs.is_empty()).then_some(0)) {
        Some(i) => (Some(i), (outputs[i].width, outputs[i].height)),
        None => {
            let size = focused
                .map(MonitorInfo::logical_size)
                .unwrap_or(FALLBACK_SCREEN);
            warn!("no toolkit monitor, assuming {}x{}", size.0, size.1);
            (None, size)
        }
    }
}

/// An axis-aligned rectangle in overlay coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Centre of the rectangle.
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }
}

/// Screen-scaled geometry of the ring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub screen_width: i32,
    pub screen_height: i32,
    pub center_x: i32,
    pub center_y: i32,
    pub radius: i32,
    pub button_size: i32,
    pub icon_size: i32,
    pub app_icon_size: i32,
    pub special_button_size: i32,
}

impl Layout {
    /// Scale the ring to a `width × height` screen.
    ///
    /// Sizes grow with the shorter screen side but never drop below the
    /// minimums that keep the ring usable on small displays.
    pub fn new(width: i32, height: i32) -> Self {
        let min_dimension = width.min(height) as f64;
        let button_size = 120.max((min_dimension * 0.08) as i32);
        Self {
            screen_width: width,
            screen_height: height,
            center_x: width / 2,
            center_y: height / 2,
            radius: 200.max((min_dimension * 0.40) as i32),
            button_size,
            icon_size: 50.max((button_size as f64 * 0.83) as i32),
            app_icon_size: 16.max((button_size as f64 * 0.17) as i32),
            special_button_size: button_size * 2,
        }
    }

    /// Centre point of a workspace button.
    pub fn button_center(&self, ws: Workspace) -> (i32, i32) {
        if ws.is_special() {
            return (self.center_x, self.center_y);
        }
        let step = 2.0 * PI / RING_SIZE as f64;
        let angle = (ws.number() - 1) as f64 * step - PI / 2.0;
        (
            (self.center_x as f64 + self.radius as f64 * angle.cos()) as i32,
            (self.center_y as f64 + self.radius as f64 * angle.sin()) as i32,
        )
    }

    /// Side length of a workspace button.
    pub fn button_side(&self, ws: Workspace) -> i32 {
        if ws.is_special() {
            self.special_button_size
        } else {
            self.button_size
        }
    }

    /// Bounding box of a workspace button.
    pub fn button_rect(&self, ws: Workspace) -> Rect {
        let (cx, cy) = self.button_center(ws);
        let side = self.button_side(ws);
        Rect {
            x: cx - side / 2,
            y: cy - side / 2,
            width: side,
            height: side,
        }
    }

    /// Pixel size a workspace icon is decoded at.
    pub fn workspace_icon_size(&self, ws: Workspace) -> i32 {
        if ws.is_special() {
            (self.icon_size as f64 * 1.8) as i32
        } else {
            self.icon_size
        }
    }

    /// Top-left positions for `count` app icons shown under a button.
    ///
    /// Icons are centred horizontally on the button and spaced so they do
    /// not overlap even at the minimum icon size.
    pub fn app_icon_positions(&self, ws: Workspace, count: usize) -> Vec<(i32, i32)> {
        if count == 0 {
            return Vec::new();
        }
        let (base_x, base_y) = self.button_center(ws);
        let y = if ws.is_special() {
            self.center_y + self.special_button_size / 2 + 20
        } else {
            base_y + self.button_size / 2 + 10
        };
        let count = count as i32;
        let spacing = 20.max(self.app_icon_size + 5);
        let start = -(count - 1) * spacing / 2;
        (0..count)
            .map(|j| (base_x + start + j * spacing - self.app_icon_size / 2, y))
            .collect()
    }

    /// Pair app icons with their slots under a button.
    ///
    /// The first `max` classes each reserve a slot; a class `resolve` finds
    /// no icon for leaves its slot empty rather than shifting the rest.
    pub fn app_icon_slots<T, F>(
        &self,
        ws: Workspace,
        classes: &[String],
        max: usize,
        mut resolve: F,
    ) -> Vec<(T, (i32, i32))>
    where
        F: FnMut(&str) -> Option<T>,
    {
        let shown = &classes[..classes.len().min(max)];
        shown
            .iter()
            .zip(self.app_icon_positions(ws, shown.len()))
            .filter_map(|(class, pos)| resolve(class).map(|icon| (icon, pos)))
            .collect()
    }

    /// Size screenshots are scaled to inside the tooltip (16:9).
    pub fn thumbnail_size(&self) -> (i32, i32) {
        let width = 200.max(self.screen_width / 6);
        let height = 112.max((width as f64 * 9.0 / 16.0) as i32);
        (width, height)
    }

    /// Point the tooltip hangs from: above a ring button, below the centre.
    pub fn tooltip_anchor(&self, ws: Workspace) -> (i32, i32) {
        if ws.is_special() {
            (self.center_x, self.center_y + self.special_button_size / 2)
        } else {
            let rect = self.button_rect(ws);
            (rect.x + rect.width / 2, rect.y - 10)
        }
    }

    /// Top-left corner for a tooltip of the given size.
    ///
    /// Ring tooltips sit centred above their button and flip below it when
    /// there is no room at the top; the special tooltip sits under the
    /// centre button.  Either way the result is pulled back inside the
    /// screen.
    pub fn tooltip_position(&self, ws: Workspace, width: i32, height: i32) -> (i32, i32) {
        let (sw, sh) = (self.screen_width, self.screen_height);

        if ws.is_special() {
            let mut x = self.center_x;
            let mut y = self.center_y + self.special_button_size / 2 + 20;
            if x + width > sw {
                x = sw - width - EDGE_PADDING;
            }
            if y < EDGE_PADDING {
                y = EDGE_PADDING;
            } else if y + height > sh - EDGE_PADDING {
                y = sh - height - EDGE_PADDING;
            }
            return (x, y);
        }

        let (ax, ay) = self.tooltip_anchor(ws);
        let mut x = ax - width / 2;
        let mut y = ay - height - 40;
        if x + width > sw {
            x = sw - width - EDGE_PADDING;
        }
        if x < EDGE_PADDING {
            x = EDGE_PADDING;
        }
        if y < EDGE_PADDING {
            y += height + 80;
        }
        if y + height > sh {
            y = sh - height - EDGE_PADDING;
        }
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ws(n: u8) -> Workspace {
        Workspace::new(n).unwrap()
    }

    fn full_hd() -> Layout {
        Layout::new(1920, 1080)
    }

    #[test]
    fn scales_with_short_side() {
        let l = full_hd();
        assert_eq!((l.center_x, l.center_y), (960, 540));
        assert_eq!(l.radius, 432);
        assert_eq!(l.button_size, 120);
        assert_eq!(l.icon_size, 99);
        assert_eq!(l.app_icon_size, 20);
        assert_eq!(l.special_button_size, 240);
    }

    #[test]
    fn small_screen_uses_minimums() {
        let l = Layout::new(400, 300);
        assert_eq!(l.radius, 200);
        assert_eq!(l.button_size, 120);
        assert_eq!(l.icon_size, 99);
        assert_eq!(l.app_icon_size, 20);
    }

    #[test]
    fn large_screen_scales_up() {
        let l = Layout::new(3840, 2160);
        assert_eq!(l.radius, 864);
        assert_eq!(l.button_size, 172);
        assert_eq!(l.special_button_size, 344);
    }

    #[test]
    fn workspace_one_at_top() {
        let l = full_hd();
        assert_eq!(l.button_center(ws(1)), (960, 108));
    }

    #[test]
    fn quarter_positions_clockwise() {
        let l = full_hd();
        // 4 at three o'clock, 7 at six, 10 at nine.
        let (x4, y4) = l.button_center(ws(4));
        assert_eq!(x4, 960 + 432);
        assert!((y4 - 540).abs() <= 1);
        let (x7, y7) = l.button_center(ws(7));
        assert!((x7 - 960).abs() <= 1);
        assert_eq!(y7, 540 + 432);
        let (x10, y10) = l.button_center(ws(10));
        assert_eq!(x10, 960 - 432);
        assert!((y10 - 540).abs() <= 1);
    }

    #[test]
    fn ring_buttons_equidistant_from_center() {
        let l = full_hd();
        for w in Workspace::regular() {
            let (x, y) = l.button_center(w);
            let d = (((x - l.center_x).pow(2) + (y - l.center_y).pow(2)) as f64).sqrt();
            assert!((d - l.radius as f64).abs() < 2.0, "workspace {} at distance {}", w, d);
        }
    }

    #[test]
    fn special_button_centered_and_double() {
        let l = full_hd();
        let r = l.button_rect(Workspace::SPECIAL);
        assert_eq!(r, Rect { x: 840, y: 420, width: 240, height: 240 });
        assert_eq!(r.center(), (960, 540));
    }

    #[test]
    fn ring_button_rect_is_centered_on_point() {
        let l = full_hd();
        let r = l.button_rect(ws(1));
        assert_eq!(r, Rect { x: 900, y: 48, width: 120, height: 120 });
    }

    #[test]
    fn special_icon_is_larger() {
        let l = full_hd();
        assert_eq!(l.workspace_icon_size(ws(3)), 99);
        assert_eq!(l.workspace_icon_size(Workspace::SPECIAL), 178);
    }

    #[test]
    fn app_icons_centered_under_button() {
        let l = full_hd();
        // spacing = max(20, 25) = 25; start = -(3 * 25) / 2 = -37
        let pos = l.app_icon_positions(ws(1), 4);
        assert_eq!(pos.len(), 4);
        assert_eq!(pos[0], (960 - 37 - 10, 108 + 60 + 10));
        assert_eq!(pos[1].0 - pos[0].0, 25);
        assert!(pos.iter().all(|&(_, y)| y == 178));
    }

    #[test]
    fn single_app_icon_is_centered() {
        let l = full_hd();
        let pos = l.app_icon_positions(ws(1), 1);
        assert_eq!(pos, vec![(960 - 10, 178)]);
    }

    #[test]
    fn special_app_icons_below_center_button() {
        let l = full_hd();
        let pos = l.app_icon_positions(Workspace::SPECIAL, 2);
        assert!(pos.iter().all(|&(_, y)| y == 540 + 120 + 20));
    }

    #[test]
    fn no_app_icons() {
        assert!(full_hd().app_icon_positions(ws(5), 0).is_empty());
    }

    #[test]
    fn missing_icon_keeps_its_slot() {
        let l = full_hd();
        let classes: Vec<String> = ["kitty", "ghost", "firefox", "vim", "extra"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let slots = l.app_icon_slots(ws(1), &classes, 4, |c| (c != "ghost").then(|| c.to_string()));
        let all = l.app_icon_positions(ws(1), 4);
        assert_eq!(
            slots,
            vec![
                ("kitty".to_string(), all[0]),
                ("firefox".to_string(), all[2]),
                ("vim".to_string(), all[3]),
            ]
        );
    }

    #[test]
    fn fewer_classes_than_slots() {
        let l = full_hd();
        let classes = vec!["kitty".to_string()];
        let slots = l.app_icon_slots(ws(2), &classes, 4, |c| Some(c.len()));
        assert_eq!(slots, vec![(5, l.app_icon_positions(ws(2), 1)[0])]);
        assert!(l.app_icon_slots(ws(2), &[], 4, |_| Some(())).is_empty());
    }

    fn monitor(name: &str, width: u32, height: u32, scale: f64) -> MonitorInfo {
        MonitorInfo {
            name: name.into(),
            width,
            height,
            scale,
            focused: true,
        }
    }

    fn output(connector: &str, width: i32, height: i32) -> Output<'_> {
        Output {
            connector: Some(connector),
            width,
            height,
        }
    }

    #[test]
    fn focused_output_wins() {
        let outputs = [output("DP-1", 2560, 1440), output("HDMI-A-1", 1920, 1080)];
        let focused = monitor("HDMI-A-1", 1920, 1080, 1.0);
        assert_eq!(
            choose_output(&outputs, Some(&focused)),
            (Some(1), (1920, 1080))
        );
    }

    #[test]
    fn unmatched_focus_uses_first_output() {
        let outputs = [
            Output {
                connector: None,
                width: 1280,
                height: 800,
            },
            output("DP-2", 1920, 1080),
        ];
        let focused = monitor("eDP-1", 2880, 1800, 2.0);
        assert_eq!(choose_output(&outputs, Some(&focused)), (Some(0), (1280, 800)));
        assert_eq!(choose_output(&outputs, None), (Some(0), (1280, 800)));
    }

    #[test]
    fn no_outputs_uses_compositor_then_default() {
        let focused = monitor("eDP-1", 2880, 1800, 2.0);
        assert_eq!(choose_output(&[], Some(&focused)), (None, (1440, 900)));
        assert_eq!(choose_output(&[], None), (None, FALLBACK_SCREEN));
    }

    #[test]
    fn thumbnail_is_sixteen_by_nine() {
        assert_eq!(full_hd().thumbnail_size(), (320, 180));
        assert_eq!(Layout::new(800, 600).thumbnail_size(), (200, 112));
    }

    #[test]
    fn ring_tooltip_above_button() {
        let l = full_hd();
        // Workspace 7 sits at the bottom: anchor (960, 972 - 60 - 10).
        let (x, y) = l.tooltip_position(ws(7), 300, 200);
        assert_eq!(x, 960 - 150);
        assert_eq!(y, 902 - 200 - 40);
    }

    #[test]
    fn ring_tooltip_flips_below_near_top() {
        let l = full_hd();
        // Workspace 1 anchor is (960, 38); 38 - 200 - 40 < 10 → flip.
        let (_, y) = l.tooltip_position(ws(1), 300, 200);
        assert_eq!(y, 38 - 200 - 40 + 200 + 80);
    }

    #[test]
    fn flipped_tooltip_pulled_above_bottom_edge() {
        let l = full_hd();
        // 902 - 1000 - 40 < 10 flips to 942, which overflows 1080.
        assert_eq!(l.tooltip_position(ws(7), 300, 1000), (810, 70));
    }

    #[test]
    fn ring_tooltip_clamped_horizontally() {
        let l = full_hd();
        let (x, _) = l.tooltip_position(ws(10), 1200, 100);
        assert_eq!(x, 10);
        let (x, _) = l.tooltip_position(ws(4), 1200, 100);
        assert_eq!(x, 1920 - 1200 - 10);
    }

    #[test]
    fn special_tooltip_below_center() {
        let l = full_hd();
        assert_eq!(l.tooltip_anchor(Workspace::SPECIAL), (960, 660));
        assert_eq!(l.tooltip_position(Workspace::SPECIAL, 300, 200), (960, 680));
    }

    #[test]
    fn special_tooltip_pulled_inside_screen() {
        let l = full_hd();
        let (x, y) = l.tooltip_position(Workspace::SPECIAL, 1000, 500);
        assert_eq!(x, 1920 - 1000 - 10);
        assert_eq!(y, 1080 - 500 - 10);
    }
}
