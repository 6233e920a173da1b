//! GTK4 + layer-shell ring overlay that runs on the **main thread**.
//!
//! # Widget tree
//!
//! ```text
//! window                         (layer-shell, full screen, transparent)
//! └ gtk4::Fixed
//!     ├ .workspace-button.workspace-<n>   × 13
//!     │   └ label, later .workspace-icon
//!     └ .app-icon                         (up to N per workspace)
//!
//! window.tooltip-window          (layer-shell, positioned by margins)
//! └ box
//!     ├ picture                  (screenshot thumbnail)
//!     └ label                    (app list)
//! ```
//!
//! The ring is shown with text labels first.  Everything slow happens
//! afterwards on idle ticks, one workspace per tick: theme icons at high
//! priority, app icons at low priority, and the tooltip window plus the
//! full stylesheet once the loop is idle.

use crate::cache::IconCache;
use crate::config::{Config, OverlayConfig};
use crate::icons::resolve_icon_name;
use crate::layout::{Layout, Output};
use crate::style::{full_css, MINIMAL_CSS};
use crate::switcher::WorkspaceSwitcher;
use crate::theme::{workspace_icon_dir, workspace_icon_path};
use crate::traits::Compositor;
use crate::workspace::{action_for_key, Action, Workspace};
use gtk4::prelude::*;
use gtk4::{gdk, gdk_pixbuf, glib};
use gtk4_layer_shell::{Edge, KeyboardMode, Layer, LayerShell};
use log::{debug, error, info, warn};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Fade-in frame interval (~120 fps).
const FADE_TICK: Duration = Duration::from_millis(8);

/// Errors that stop the overlay from starting.
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error("failed to initialise GTK4: {0}")]
    Init(#[from] glib::BoolError),
    #[error("no GDK display")]
    NoDisplay,
}

//  Hover preview window

struct Tooltip {
    window: gtk4::Window,
    content: gtk4::Box,
    picture: gtk4::Picture,
    label: gtk4::Label,
}

//  Overlay state shared by every callback

struct Overlay<C: Compositor> {
    switcher: WorkspaceSwitcher<C>,
    layout: Layout,
    config: OverlayConfig,
    icon_dir: PathBuf,
    monitor: Option<gdk::Monitor>,
    icon_theme: gtk4::IconTheme,

    window: gtk4::Window,
    fixed: gtk4::Fixed,
    buttons: HashMap<Workspace, gtk4::Button>,
    tooltip: RefCell<Option<Tooltip>>,
    fade_done: Cell<bool>,

    workspace_icons: RefCell<IconCache<Workspace, gdk::Texture>>,
    theme_icons: RefCell<IconCache<String, gtk4::IconPaintable>>,
    app_icons: RefCell<HashMap<Workspace, Vec<gtk4::Image>>>,

    main_loop: glib::MainLoop,
}

impl<C: Compositor + 'static> Overlay<C> {
    //  User input

    /// Act on a pick and close the overlay, whether or not the dispatch
    /// succeeded.
    fn pick(&self, action: Action) {
        if let Err(e) = self.switcher.handle(action) {
            error!("{}", e);
        }
        self.quit();
    }

    fn quit(&self) {
        self.hide_tooltip();
        self.main_loop.quit();
    }

    fn connect_signals(self: &Rc<Self>) {
        for (&ws, button) in &self.buttons {
            let o = self.clone();
            button.connect_clicked(move |_| o.pick(Action::Switch(ws)));

            let motion = gtk4::EventControllerMotion::new();
            let o = self.clone();
            motion.connect_enter(move |_, _, _| o.show_tooltip(ws));
            let o = self.clone();
            motion.connect_leave(move |_| o.hide_tooltip());
            button.add_controller(motion);
        }

        self.window.add_controller(self.key_controller());

        let o = self.clone();
        self.window.connect_close_request(move |_| {
            o.quit();
            glib::Propagation::Proceed
        });
    }

    fn key_controller(self: &Rc<Self>) -> gtk4::EventControllerKey {
        let keys = gtk4::EventControllerKey::new();
        let o = self.clone();
        keys.connect_key_pressed(move |_, key, _, _| {
            match key.name().and_then(|name| action_for_key(&name)) {
                Some(action) => {
                    debug!("key {:?} -> {:?}", key.name(), action);
                    o.pick(action);
                    glib::Propagation::Stop
                }
                None => glib::Propagation::Proceed,
            }
        });
        keys
    }

    //  Fade-in

    fn start_fade_in(self: &Rc<Self>) {
        let duration = Duration::from_millis(self.config.fade_in_ms);
        if duration.is_zero() {
            self.fade_done.set(true);
            return;
        }
        self.window.set_opacity(0.0);
        let start = Instant::now();
        let o = self.clone();
        glib::timeout_add_local(FADE_TICK, move || {
            let t = (start.elapsed().as_secs_f64() / duration.as_secs_f64()).min(1.0);
            o.window.set_opacity(t);
            if t >= 1.0 {
                o.fade_done.set(true);
                o.window.queue_draw();
                glib::ControlFlow::Break
            } else {
                glib::ControlFlow::Continue
            }
        });
    }

    //  Incremental loading

    fn schedule_loaders(self: &Rc<Self>, display: gdk::Display) {
        let mut pending = Workspace::all();
        let o = self.clone();
        glib::idle_add_local_full(glib::Priority::HIGH, move || match pending.next() {
            Some(ws) => {
                o.load_workspace_icon(ws);
                glib::ControlFlow::Continue
            }
            None => {
                debug!(
                    "workspace icons done ({} of 13 found)",
                    o.workspace_icons.borrow().loaded()
                );
                glib::ControlFlow::Break
            }
        });

        let mut pending = Workspace::all();
        let o = self.clone();
        glib::idle_add_local_full(glib::Priority::LOW, move || match pending.next() {
            Some(ws) => {
                o.load_app_icons(ws);
                glib::ControlFlow::Continue
            }
            None => {
                debug!("app icons done ({} classes)", o.theme_icons.borrow().len());
                glib::ControlFlow::Break
            }
        });

        let o = self.clone();
        glib::idle_add_local_full(glib::Priority::LOW, move || {
            *o.tooltip.borrow_mut() = Some(o.build_tooltip());
            install_css(&display, &full_css(), gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION + 1);
            debug!("tooltip and full CSS ready");
            glib::ControlFlow::Break
        });
    }

    /// Swap a button's label for its theme icon.  Missing or undecodable
    /// files leave the label in place.
    fn load_workspace_icon(&self, ws: Workspace) {
        let path = workspace_icon_path(&self.icon_dir, ws);
        let size = self.layout.workspace_icon_size(ws);
        let texture = self
            .workspace_icons
            .borrow_mut()
            .get_or_load(ws, |_| load_texture(&path, size, size));
        let (Some(texture), Some(button)) = (texture, self.buttons.get(&ws)) else {
            return;
        };
        let image = gtk4::Image::from_paintable(Some(&texture));
        image.set_pixel_size(size);
        image.add_css_class("workspace-icon");
        button.set_child(Some(&image));
    }

    /// Place icons for the first apps of `ws` under its button.
    fn load_app_icons(&self, ws: Workspace) {
        let classes = self.switcher.app_classes(ws);
        let slots =
            self.layout
                .app_icon_slots(ws, &classes, self.config.max_app_icons, |c| self.app_icon(c));
        let mut images = Vec::new();
        for (paintable, (x, y)) in slots {
            let image = gtk4::Image::from_paintable(Some(&paintable));
            image.set_pixel_size(self.layout.app_icon_size);
            image.add_css_class("app-icon");
            self.fixed.put(&image, x as f64, y as f64);
            images.push(image);
        }
        debug!("workspace {}: {} app icon(s)", ws, images.len());
        if !images.is_empty() {
            self.app_icons.borrow_mut().insert(ws, images);
        }
    }

    fn app_icon(&self, class: &str) -> Option<gtk4::IconPaintable> {
        self.theme_icons
            .borrow_mut()
            .get_or_load(class.to_string(), |class| {
                let name = resolve_icon_name(class, |n| self.icon_theme.has_icon(n))?;
                Some(self.icon_theme.lookup_icon(
                    &name,
                    &[],
                    self.layout.app_icon_size,
                    1,
                    gtk4::TextDirection::None,
                    gtk4::IconLookupFlags::empty(),
                ))
            })
    }

    //  Tooltip

    fn build_tooltip(self: &Rc<Self>) -> Tooltip {
        let window = gtk4::Window::new();
        window.init_layer_shell();
        window.set_layer(Layer::Overlay);
        window.set_namespace("hyprring-preview");
        window.set_keyboard_mode(KeyboardMode::None);
        window.set_anchor(Edge::Top, true);
        window.set_anchor(Edge::Left, true);
        if let Some(monitor) = &self.monitor {
            window.set_monitor(Some(monitor));
        }
        window.set_decorated(false);
        window.set_resizable(false);
        window.remove_css_class("background");
        window.add_css_class("tooltip-window");

        let content = gtk4::Box::new(gtk4::Orientation::Vertical, 10);
        content.set_margin_start(10);
        content.set_margin_end(10);
        content.set_margin_top(10);
        content.set_margin_bottom(10);

        let picture = gtk4::Picture::new();
        picture.set_can_shrink(false);
        picture.set_visible(false);
        content.append(&picture);

        let label = gtk4::Label::new(None);
        label.set_justify(gtk4::Justification::Left);
        label.set_xalign(0.0);
        content.append(&label);

        window.set_child(Some(&content));
        window.add_controller(self.key_controller());

        Tooltip {
            window,
            content,
            picture,
            label,
        }
    }

    fn show_tooltip(&self, ws: Workspace) {
        if !self.fade_done.get() {
            return;
        }
        let tooltip = self.tooltip.borrow();
        let Some(tooltip) = tooltip.as_ref() else {
            return;
        };

        let preview = self.switcher.preview(ws);
        let (thumb_w, thumb_h) = self.layout.thumbnail_size();
        match preview
            .thumbnail
            .as_deref()
            .and_then(|p| load_texture(p, thumb_w, thumb_h))
        {
            Some(texture) => {
                tooltip.picture.set_paintable(Some(&texture));
                tooltip.picture.set_visible(true);
            }
            None => {
                tooltip.picture.set_paintable(None::<&gdk::Paintable>);
                tooltip.picture.set_visible(false);
            }
        }
        tooltip.label.set_text(&preview.text());

        let (_, width, _, _) = tooltip.content.measure(gtk4::Orientation::Horizontal, -1);
        let (_, height, _, _) = tooltip.content.measure(gtk4::Orientation::Vertical, width);
        let (x, y) = self.layout.tooltip_position(ws, width, height);
        tooltip.window.set_margin(Edge::Left, x);
        tooltip.window.set_margin(Edge::Top, y);
        tooltip.window.set_visible(true);
    }

    fn hide_tooltip(&self) {
        if let Some(tooltip) = self.tooltip.borrow().as_ref() {
            tooltip.window.set_visible(false);
        }
    }

    /// Drop every cached icon and the widgets that show them.
    fn clear_caches(&self) {
        let mut workspace_icons = self.workspace_icons.borrow_mut();
        let mut theme_icons = self.theme_icons.borrow_mut();
        debug!(
            "releasing {} workspace icon(s), {} theme icon(s)",
            workspace_icons.loaded(),
            theme_icons.loaded()
        );
        workspace_icons.clear();
        theme_icons.clear();
        for (_, images) in self.app_icons.borrow_mut().drain() {
            for image in images {
                self.fixed.remove(&image);
            }
        }
    }
}

//  Public API

/// Show the ring on the **current** (main) thread and block until the user
/// picks a workspace or cancels.
pub fn run<C: Compositor + 'static>(
    switcher: WorkspaceSwitcher<C>,
    config: &Config,
    css_path: Option<PathBuf>,
) -> Result<(), OverlayError> {
    gtk4::init()?;
    info!("GTK4 initialised on main thread");

    let display = gdk::Display::default().ok_or(OverlayError::NoDisplay)?;
    install_css(&display, MINIMAL_CSS, gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION);

    let (monitor, (width, height)) = screen_geometry(&display, &switcher);
    let layout = Layout::new(width, height);
    let icon_dir = workspace_icon_dir(&config.theme);
    info!(
        "ring {}x{} on {}, icons from {}",
        width,
        height,
        monitor
            .as_ref()
            .and_then(|m| m.connector())
            .map(|c| c.to_string())
            .unwrap_or_else(|| "<default>".into()),
        icon_dir.display()
    );

    //  Layer-shell window
    let window = gtk4::Window::new();
    window.set_title(Some("Workspace Switcher"));
    window.init_layer_shell();
    window.set_layer(Layer::Overlay);
    window.set_namespace("hyprring");
    for edge in [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right] {
        window.set_anchor(edge, true);
    }
    window.set_keyboard_mode(KeyboardMode::Exclusive);
    if let Some(m) = &monitor {
        window.set_monitor(Some(m));
    }
    window.set_decorated(false);
    window.set_default_size(width, height);
    window.remove_css_class("background");

    let fixed = gtk4::Fixed::new();
    window.set_child(Some(&fixed));

    //  Buttons, labels only
    let mut buttons = HashMap::new();
    for ws in Workspace::all() {
        let rect = layout.button_rect(ws);
        let button = gtk4::Button::with_label(&ws.to_string());
        button.set_size_request(rect.width, rect.height);
        button.set_has_frame(false);
        button.add_css_class("workspace-button");
        button.add_css_class(&format!("workspace-{}", ws));
        fixed.put(&button, rect.x as f64, rect.y as f64);
        buttons.insert(ws, button);
    }

    let overlay = Rc::new(Overlay {
        switcher,
        layout,
        config: config.overlay.clone(),
        icon_dir,
        monitor,
        icon_theme: gtk4::IconTheme::for_display(&display),
        window,
        fixed,
        buttons,
        tooltip: RefCell::new(None),
        fade_done: Cell::new(false),
        workspace_icons: RefCell::new(IconCache::new()),
        theme_icons: RefCell::new(IconCache::new()),
        app_icons: RefCell::new(HashMap::new()),
        main_loop: glib::MainLoop::new(None, false),
    });

    overlay.connect_signals();
    overlay.start_fade_in();
    overlay.window.present();
    overlay.window.grab_focus();
    overlay.schedule_loaders(display.clone());

    if let Some(path) = css_path.filter(|p| p.exists()) {
        match std::fs::read_to_string(&path) {
            Ok(css) => {
                info!("user CSS: {} ({} bytes)", path.display(), css.len());
                install_css(&display, &css, gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION + 2);
            }
            Err(e) => warn!("CSS read failed ({}): {}", path.display(), e),
        }
    }

    info!("entering GLib main loop");
    overlay.main_loop.run();
    info!("GLib main loop exited");

    overlay.clear_caches();
    if let Some(tooltip) = overlay.tooltip.take() {
        tooltip.window.destroy();
    }
    overlay.window.destroy();
    Ok(())
}

//  Helpers

/// Pick the GDK monitor to cover and its logical size.
fn screen_geometry<C: Compositor>(
    display: &gdk::Display,
    switcher: &WorkspaceSwitcher<C>,
) -> (Option<gdk::Monitor>, (i32, i32)) {
    let list = display.monitors();
    let monitors: Vec<gdk::Monitor> = (0..list.n_items())
        .filter_map(|i| list.item(i).and_downcast::<gdk::Monitor>())
        .collect();
    let connectors: Vec<Option<glib::GString>> = monitors.iter().map(|m| m.connector()).collect();
    let outputs: Vec<Output<'_>> = monitors
        .iter()
        .zip(&connectors)
        .map(|(m, connector)| {
            let geometry = m.geometry();
            Output {
                connector: connector.as_ref().map(|c| c.as_str()),
                width: geometry.width(),
                height: geometry.height(),
            }
        })
        .collect();

    let (index, size) = switcher.pick_output(&outputs);
    (index.and_then(|i| monitors.get(i).cloned()), size)
}

/// Decode an image scaled to fit `width × height`.
fn load_texture(path: &Path, width: i32, height: i32) -> Option<gdk::Texture> {
    if !path.exists() {
        debug!("no image at {}", path.display());
        return None;
    }
    match gdk_pixbuf::Pixbuf::from_file_at_size(path, width, height) {
        Ok(pixbuf) => Some(gdk::Texture::for_pixbuf(&pixbuf)),
        Err(e) => {
            warn!("failed to decode {}: {}", path.display(), e);
            None
        }
    }
}

fn install_css(display: &gdk::Display, css: &str, priority: u32) {
    let provider = gtk4::CssProvider::new();
    #[allow(deprecated)]
    provider.load_from_data(css);
    gtk4::style_context_add_provider_for_display(display, &provider, priority);
}
