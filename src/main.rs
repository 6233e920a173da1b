//! Entry point for **hyprring**.
//!
//! Without arguments the ring overlay is shown on the main thread (GTK4
//! requires it) and the process exits once a workspace was picked or the
//! overlay was cancelled.  `--switch <n>` performs the same dispatch
//! without any UI.

use hyprring::cli::{Args, USAGE};
use hyprring::config::Config;
use hyprring::hyprland::wm::HyprlandWm;
use hyprring::switcher::WorkspaceSwitcher;
use hyprring::traits::Compositor;
use log::{error, info};
use std::path::{Path, PathBuf};

/// Resolve the config directory (`$XDG_CONFIG_HOME/hyprring`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("hyprring")
}

/// Load the config from `path`, or `$XDG_CONFIG_HOME/hyprring/config.json`,
/// falling back to compiled-in defaults.
fn load_config(path: Option<&Path>) -> Config {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config_dir().join("config.json"));
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

/// Resolve the CSS stylesheet path.
#[cfg(feature = "overlay-gtk")]
fn css_path() -> PathBuf {
    config_dir().join("style.css")
}

//  Dry-run compositor (--dry-run)

mod dry_run {
    use hyprring::traits::{ClientInfo, Compositor, MonitorInfo, WorkspaceRef};
    use log::info;

    /// Answers queries from the wrapped compositor but only logs dispatches.
    pub struct DryRun<C>(pub C);

    impl<C: Compositor> Compositor for DryRun<C> {
        type Error = C::Error;

        fn clients(&self) -> Result<Vec<ClientInfo>, C::Error> {
            self.0.clients()
        }

        fn active_workspace(&self) -> Result<Option<WorkspaceRef>, C::Error> {
            self.0.active_workspace()
        }

        fn monitors(&self) -> Result<Vec<MonitorInfo>, C::Error> {
            self.0.monitors()
        }

        fn switch_workspace(&self, id: u8) -> Result<(), C::Error> {
            info!("dry run: dispatch workspace {}", id);
            Ok(())
        }

        fn toggle_special(&self, name: &str) -> Result<(), C::Error> {
            info!("dry run: dispatch togglespecialworkspace {}", name);
            Ok(())
        }
    }
}

use dry_run::DryRun;

//  Main

fn main() {
    env_logger::init();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };
    if args.help {
        println!("{}", USAGE);
        return;
    }

    let config = load_config(args.config.as_deref());
    let wm = HyprlandWm::new(config.transport);

    if args.dry_run {
        info!("dry run: dispatches are logged, not sent");
        run(DryRun(wm), &args, &config);
    } else {
        run(wm, &args, &config);
    }
}

fn run<C: Compositor + 'static>(wm: C, args: &Args, config: &Config) {
    let switcher = WorkspaceSwitcher::new(wm, config);

    if let Some(ws) = args.switch {
        if let Err(e) = switcher.switch_to(ws) {
            error!("{}", e);
            std::process::exit(1);
        }
        return;
    }

    start_overlay(switcher, config);
}

//  Overlay

#[cfg(feature = "overlay-gtk")]
fn start_overlay<C: Compositor + 'static>(switcher: WorkspaceSwitcher<C>, config: &Config) {
    if let Err(e) = hyprring::overlay::gtk::run(switcher, config, Some(css_path())) {
        error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "overlay-gtk"))]
fn start_overlay<C: Compositor>(_switcher: WorkspaceSwitcher<C>, _config: &Config) {
    error!("the ring overlay requires the `overlay-gtk` feature; use --switch <n>");
    std::process::exit(1);
}
