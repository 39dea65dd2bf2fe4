#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use eframe::egui;
use lnk_launcher::controller::AppState;
use lnk_launcher::gui::LauncherApp;
use lnk_launcher::icon::SystemIconResolver;
use lnk_launcher::logging;
use lnk_launcher::settings::{AppPaths, ViewConfig};
use lnk_launcher::shortcut::ShellLinkResolver;

fn main() -> anyhow::Result<()> {
    let paths = AppPaths::default();
    let loaded = ViewConfig::try_load(&paths.config_file);
    let view = match &loaded {
        Ok(Some(cfg)) => cfg.clone(),
        _ => ViewConfig::default(),
    };
    logging::init(view.debug_logging, view.log_file.clone());
    if let Err(e) = loaded {
        tracing::error!(path = %paths.config_file.display(), error = %e, "failed to load view config; using defaults");
    }

    let state = AppState::new(
        paths,
        view.clone(),
        Box::new(ShellLinkResolver),
        Box::new(SystemIconResolver),
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("App Launcher")
            .with_inner_size([view.size.0 as f32, view.size.1 as f32])
            .with_position([view.position.0 as f32, view.position.1 as f32])
            .with_min_inner_size([320.0, 240.0]),
        ..Default::default()
    };

    eframe::run_native(
        "App Launcher",
        native_options,
        Box::new(move |cc| Box::new(LauncherApp::new(&cc.egui_ctx, state))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
